//! Runs rendered statements against a live PostgreSQL.
//!
//! Skipped unless `DATABASE_URL` is set (a `.env` file is honored).

use sqlcat::{Builder, SqlBuilder, parse_orders};

const PETS: &str = "(VALUES (1, 'Korone', 'dog', 10), (2, 'Pekora', 'rabbit', 10), \
                     (3, 'Koyori', 'dog', 20), (4, 'Mio', 'wolf', 20)) AS pets(id, name, type, owner_id)";

async fn try_connect() -> Option<tokio_postgres::Client> {
    let _ = dotenvy::dotenv();
    let database_url = std::env::var("DATABASE_URL").ok()?;
    let (client, connection) = tokio_postgres::connect(&database_url, tokio_postgres::NoTls)
        .await
        .expect("Failed to connect to DATABASE_URL with NoTls");
    tokio::spawn(async move {
        if let Err(e) = connection.await {
            eprintln!("tokio-postgres connection error: {e}");
        }
    });
    Some(client)
}

async fn count(client: &tokio_postgres::Client, q: &impl SqlBuilder) -> i64 {
    client
        .query_one(&q.build_sql(), &q.params_ref())
        .await
        .expect("count query")
        .get(0)
}

#[tokio::test]
async fn select_and_count_agree_on_filters() {
    let Some(client) = try_connect().await else {
        eprintln!("DATABASE_URL not set; skipping");
        return;
    };

    let mut qb = Builder::new(PETS);
    qb.set_columns(["id", "name"]);
    qb.bind_condition("name ILIKE $n", "%o%".to_string())
        .add_raw_condition("(type = 'dog' OR type = 'wolf')");
    qb.with_orders(parse_orders(["id:desc"])).with_limit(2);

    let page = qb.build();
    let rows = client.query(page.sql(), &page.params()).await.unwrap();
    let ids: Vec<i32> = rows.iter().map(|r| r.get(0)).collect();
    assert_eq!(ids, vec![4, 3]);

    assert_eq!(count(&client, &qb.build_count()).await, 3);
}

#[tokio::test]
async fn grouped_count_counts_groups() {
    let Some(client) = try_connect().await else {
        eprintln!("DATABASE_URL not set; skipping");
        return;
    };

    let mut qb = Builder::new(PETS);
    qb.set_columns(["owner_id", "count(*)"])
        .set_groups(["owner_id"])
        .set_having(["count(*) > 1"]);
    qb.bind_condition("id >= $n", 1_i32);

    assert_eq!(count(&client, &qb.build_count()).await, 2);
}
