use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelpTopic {
    Root,
    Render,
    Orders,
}

#[derive(Debug, Clone)]
pub struct Cli {
    pub verbose: bool,
    pub command: Command,
}

#[derive(Debug, Clone)]
pub enum Command {
    Help(HelpTopic),
    Render(RenderArgs),
    Orders(OrdersArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone)]
pub struct RenderArgs {
    pub file: PathBuf,
    pub count: bool,
    pub orders: Vec<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub format: OutputFormat,
}

#[derive(Debug, Clone)]
pub struct OrdersArgs {
    pub tokens: Vec<String>,
}

pub fn parse_args(args: &[String]) -> anyhow::Result<Cli> {
    let mut it = args.iter().skip(1).map(|s| s.as_str()).peekable();

    let mut verbose = false;
    while let Some(&flag) = it.peek() {
        if flag == "-v" || flag == "--verbose" {
            verbose = true;
            it.next();
        } else {
            break;
        }
    }

    let command = match it.next() {
        None | Some("-h" | "--help" | "help") => Command::Help(HelpTopic::Root),
        Some("render") => parse_render(it)?,
        Some("orders") => parse_orders(it)?,
        Some(other) => anyhow::bail!("unknown command: {other}"),
    };

    Ok(Cli { verbose, command })
}

fn parse_render<'a>(mut it: impl Iterator<Item = &'a str>) -> anyhow::Result<Command> {
    let mut file: Option<PathBuf> = None;
    let mut count = false;
    let mut orders: Vec<String> = Vec::new();
    let mut limit: Option<i64> = None;
    let mut offset: Option<i64> = None;
    let mut format = OutputFormat::Text;

    while let Some(token) = it.next() {
        match token {
            "-h" | "--help" => return Ok(Command::Help(HelpTopic::Render)),
            "--count" => count = true,
            "--order" => {
                let Some(v) = it.next() else {
                    anyhow::bail!("--order requires a value");
                };
                orders.extend(split_csv(v));
            }
            _ if token.starts_with("--order=") => {
                orders.extend(split_csv(token.trim_start_matches("--order=")));
            }
            "--limit" => {
                let Some(v) = it.next() else {
                    anyhow::bail!("--limit requires a value");
                };
                limit = Some(parse_int("--limit", v)?);
            }
            _ if token.starts_with("--limit=") => {
                limit = Some(parse_int("--limit", token.trim_start_matches("--limit="))?);
            }
            "--offset" => {
                let Some(v) = it.next() else {
                    anyhow::bail!("--offset requires a value");
                };
                offset = Some(parse_int("--offset", v)?);
            }
            _ if token.starts_with("--offset=") => {
                offset = Some(parse_int("--offset", token.trim_start_matches("--offset="))?);
            }
            "--format" => {
                let Some(v) = it.next() else {
                    anyhow::bail!("--format requires a value");
                };
                format = parse_format(v)?;
            }
            _ if token.starts_with("--format=") => {
                format = parse_format(token.trim_start_matches("--format="))?;
            }
            other if other.starts_with('-') => anyhow::bail!("unknown argument: {other}"),
            other => {
                if file.is_some() {
                    anyhow::bail!("unexpected argument: {other}");
                }
                file = Some(PathBuf::from(other));
            }
        }
    }

    let Some(file) = file else {
        anyhow::bail!("render requires a template file");
    };

    Ok(Command::Render(RenderArgs {
        file,
        count,
        orders,
        limit,
        offset,
        format,
    }))
}

fn parse_orders<'a>(it: impl Iterator<Item = &'a str>) -> anyhow::Result<Command> {
    let mut tokens = Vec::new();
    for token in it {
        match token {
            "-h" | "--help" => return Ok(Command::Help(HelpTopic::Orders)),
            _ => tokens.push(token.to_string()),
        }
    }
    if tokens.is_empty() {
        anyhow::bail!("orders requires at least one token");
    }
    Ok(Command::Orders(OrdersArgs { tokens }))
}

fn split_csv(v: &str) -> Vec<String> {
    v.split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

fn parse_int(flag: &str, v: &str) -> anyhow::Result<i64> {
    v.parse()
        .map_err(|e| anyhow::anyhow!("{flag} expects an integer, got {v:?}: {e}"))
}

fn parse_format(v: &str) -> anyhow::Result<OutputFormat> {
    match v {
        "text" => Ok(OutputFormat::Text),
        "json" => Ok(OutputFormat::Json),
        other => anyhow::bail!("unknown format: {other} (expected text or json)"),
    }
}

pub fn print_help(topic: HelpTopic) {
    match topic {
        HelpTopic::Root => {
            println!(
                "\
sqlcat - assemble SQL SELECT/COUNT statements from query fragments

USAGE:
  sqlcat [-v] <COMMAND> [OPTIONS]

COMMANDS:
  render        Render a TOML query template
  orders        Normalize REST order tokens (column:direction)

GLOBAL OPTIONS:
  -v, --verbose         Log rendered SQL to stderr (RUST_LOG overrides)

Run `sqlcat <command> --help` for more."
            );
        }
        HelpTopic::Render => {
            println!(
                "\
USAGE:
  sqlcat render <FILE> [OPTIONS]

OPTIONS:
  --count               Render the COUNT variant (drops ORDER BY/LIMIT/OFFSET)
  --order <TOKENS>      Order tokens, comma-separated or repeated (e.g. name:asc)
  --limit <N>           LIMIT override (ignored unless > 0)
  --offset <N>          OFFSET override (ignored unless > 0)
  --format <FMT>        Output format: text (default) or json
  -h, --help            Print help"
            );
        }
        HelpTopic::Orders => {
            println!(
                "\
USAGE:
  sqlcat orders <TOKEN>...

Prints each token as an ORDER BY item, one per line:
  name          -> name
  name:asc      -> name ASC
  pets.name:asc -> pets.name ASC"
            );
        }
    }
}
