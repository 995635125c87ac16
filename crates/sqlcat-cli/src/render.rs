use crate::cli::{OutputFormat, RenderArgs};
use anyhow::Context;
use serde::Serialize;
use sqlcat::{QueryTemplate, parse_orders};

#[derive(Debug, Serialize)]
struct Rendered<'a> {
    sql: &'a str,
    args: Vec<&'a serde_json::Value>,
}

pub fn run(args: &RenderArgs) -> anyhow::Result<String> {
    let template = QueryTemplate::from_path(&args.file)
        .with_context(|| format!("failed to load template {}", args.file.display()))?;
    tracing::debug!(file = %args.file.display(), "loaded template");
    render(&template, args)
}

fn render(template: &QueryTemplate, args: &RenderArgs) -> anyhow::Result<String> {
    let mut builder = template.into_builder()?;
    builder.with_orders(parse_orders(&args.orders));
    if let Some(limit) = args.limit {
        builder.with_limit(limit);
    }
    if let Some(offset) = args.offset {
        builder.with_offset(offset);
    }

    let query = if args.count {
        builder.build_count()
    } else {
        builder.build()
    };
    let values = template.args();

    match args.format {
        OutputFormat::Text => {
            let mut out = query.sql().to_string();
            for (i, value) in values.iter().enumerate() {
                out.push_str(&format!("\n${} = {value}", i + 1));
            }
            Ok(out)
        }
        OutputFormat::Json => {
            let rendered = Rendered {
                sql: query.sql(),
                args: values,
            };
            Ok(serde_json::to_string_pretty(&rendered)?)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const PETS: &str = r#"
table = "pets"
columns = ["*"]
orders = ["name:asc"]
limit = 10

[[conditions]]
sql = "name ILIKE $n"
args = ["%Korone%"]

[[conditions]]
sql = "(type = 'dog')"
"#;

    fn args() -> RenderArgs {
        RenderArgs {
            file: PathBuf::from("pets.toml"),
            count: false,
            orders: Vec::new(),
            limit: None,
            offset: None,
            format: OutputFormat::Text,
        }
    }

    #[test]
    fn text_output_lists_arguments() {
        let tpl = QueryTemplate::from_toml_str(PETS).unwrap();
        let out = render(&tpl, &args()).unwrap();
        assert_eq!(
            out,
            "SELECT * FROM pets WHERE name ILIKE $1 AND (type = 'dog') ORDER BY name ASC LIMIT 10\n$1 = \"%Korone%\""
        );
    }

    #[test]
    fn overrides_go_through_guarded_mutators() {
        let tpl = QueryTemplate::from_toml_str(PETS).unwrap();
        let mut a = args();
        a.orders = vec!["id:desc".to_string()];
        a.limit = Some(0);
        a.offset = Some(20);
        let out = render(&tpl, &a).unwrap();
        assert!(out.starts_with(
            "SELECT * FROM pets WHERE name ILIKE $1 AND (type = 'dog') ORDER BY id DESC LIMIT 10 OFFSET 20"
        ));
    }

    #[test]
    fn count_output_drops_paging() {
        let tpl = QueryTemplate::from_toml_str(PETS).unwrap();
        let mut a = args();
        a.count = true;
        a.format = OutputFormat::Json;
        let out = render(&tpl, &a).unwrap();
        let v: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(
            v["sql"],
            "SELECT count(*) FROM (SELECT * FROM pets WHERE name ILIKE $1 AND (type = 'dog')) AS countq"
        );
        assert_eq!(v["args"], serde_json::json!(["%Korone%"]));
    }

    #[test]
    fn demo_templates_render() {
        let demos = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("demos");

        let mut a = args();
        a.file = demos.join("pets.toml");
        let out = run(&a).unwrap();
        assert_eq!(
            out.lines().next().unwrap(),
            "SELECT p.id, p.name, o.name AS owner FROM pets AS p JOIN owners AS o ON o.id = p.owner_id \
             WHERE p.name ILIKE $1 AND (p.type = 'dog' OR p.type = 'god') AND p.age BETWEEN $2 AND $3 \
             ORDER BY p.name ASC LIMIT 30"
        );
        assert_eq!(out.lines().skip(1).collect::<Vec<_>>(), ["$1 = \"%Korone%\"", "$2 = 1", "$3 = 9"]);

        a.file = demos.join("owners_with_pets.toml");
        a.count = true;
        assert_eq!(
            run(&a).unwrap(),
            "SELECT count(*) FROM (SELECT owner_id, count(*) AS pets FROM pets GROUP BY owner_id HAVING count(*) > 1) AS countq"
        );
    }

    #[test]
    fn missing_file_reports_path() {
        let mut a = args();
        a.file = PathBuf::from("/nonexistent/sqlcat/pets.toml");
        let err = run(&a).unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/sqlcat/pets.toml"));
    }
}
