mod common;

use std::fs;
use std::sync::Arc;
use std::sync::atomic::Ordering;

use serde_json::Value;

use claimsight::db::seed::{POLICY_TYPES, SEEDED_CUSTOMERS};
use claimsight::service::{Orchestrator, QueryReply, SqlGateway};

use common::{FailingTranslator, SpyGateway, StubTranslator, temp_store};

#[tokio::test]
async fn translation_failure_never_reaches_the_gateway() {
    let gateway = SpyGateway::new();
    let orchestrator = Orchestrator::new(Arc::new(FailingTranslator), gateway.clone());

    let reply = orchestrator.answer("how many customers are there?").await;

    match reply {
        QueryReply::Error { sql, message } => {
            assert!(sql.is_none());
            assert!(message.contains("upstream unavailable"));
        }
        other => panic!("expected error reply, got {other:?}"),
    }
    assert_eq!(gateway.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn empty_translation_never_reaches_the_gateway() {
    let gateway = SpyGateway::new();
    let translator = StubTranslator::returning("   ");
    let orchestrator = Orchestrator::new(translator.clone(), gateway.clone());

    let reply = orchestrator.answer("anything at all").await;

    match reply {
        QueryReply::Error { sql, message } => {
            assert!(sql.is_none());
            assert!(message.contains("no SQL produced"));
        }
        other => panic!("expected error reply, got {other:?}"),
    }
    assert_eq!(translator.calls.load(Ordering::SeqCst), 1);
    assert_eq!(gateway.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn select_reply_columns_match_the_projection() {
    let (store, path) = temp_store("projection").await;
    store.reset().await.expect("reset failed");

    let translator = StubTranslator::returning("SELECT first_name, last_name FROM customers");
    let orchestrator = Orchestrator::new(translator, Arc::new(store) as Arc<dyn SqlGateway>);

    let reply = orchestrator.answer("list customer names").await;
    match reply {
        QueryReply::Ok {
            columns,
            rows,
            row_count,
            ..
        } => {
            assert_eq!(columns, vec!["first_name", "last_name"]);
            assert_eq!(row_count, SEEDED_CUSTOMERS);
            assert_eq!(rows.len(), SEEDED_CUSTOMERS);
        }
        other => panic!("expected tabular reply, got {other:?}"),
    }

    let _ = fs::remove_file(path);
}

#[tokio::test]
async fn malformed_sql_reports_engine_error_and_statement() {
    let (store, path) = temp_store("malformed").await;
    store.reset().await.expect("reset failed");

    let bad_sql = "SELECT * FROM missing_table";
    let translator = StubTranslator::returning(bad_sql);
    let orchestrator = Orchestrator::new(translator, Arc::new(store) as Arc<dyn SqlGateway>);

    let reply = orchestrator.answer("query a table that does not exist").await;
    match reply {
        QueryReply::Error { sql, message } => {
            assert_eq!(sql.as_deref(), Some(bad_sql));
            assert!(
                message.contains("missing_table"),
                "engine error text should name the table: {message}"
            );
        }
        other => panic!("expected error reply, got {other:?}"),
    }

    let _ = fs::remove_file(path);
}

#[tokio::test]
async fn reset_is_idempotent_on_customer_count() {
    let (store, path) = temp_store("idempotent").await;

    for _ in 0..3 {
        store.reset().await.expect("reset failed");
        let result = store
            .execute("SELECT count(*) FROM customers")
            .await
            .expect("count query failed");
        assert_eq!(result.rows[0][0], Value::from(SEEDED_CUSTOMERS as i64));
    }

    let _ = fs::remove_file(path);
}

#[tokio::test]
async fn policy_types_round_trip_the_seed_set() {
    let (store, path) = temp_store("roundtrip").await;
    store.reset().await.expect("reset failed");

    let result = store
        .execute("SELECT name, description, base_premium, coverage_limit FROM policy_types")
        .await
        .expect("select failed");

    assert_eq!(result.rows.len(), POLICY_TYPES.len());
    for (name, description, base_premium, coverage_limit) in POLICY_TYPES {
        let expected = vec![
            Value::from(name),
            Value::from(description),
            Value::from(base_premium),
            Value::from(coverage_limit),
        ];
        assert!(
            result.rows.contains(&expected),
            "seeded policy type {name} not found in result"
        );
    }

    let _ = fs::remove_file(path);
}

#[tokio::test]
async fn policies_by_type_end_to_end() {
    let (store, path) = temp_store("bytype").await;
    store.reset().await.expect("reset failed");

    let sql = "SELECT pt.name AS policy_type, COUNT(*) AS policy_count \
               FROM policies p JOIN policy_types pt ON pt.type_id = p.type_id \
               GROUP BY pt.name";
    let translator = StubTranslator::returning(sql);
    let orchestrator =
        Orchestrator::new(translator, Arc::new(store.clone()) as Arc<dyn SqlGateway>);

    let reply = orchestrator.answer("Show the number of policies by type").await;
    let QueryReply::Ok { columns, rows, .. } = reply else {
        panic!("expected tabular reply");
    };
    assert_eq!(columns, vec!["policy_type", "policy_count"]);
    assert!(!rows.is_empty() && rows.len() <= POLICY_TYPES.len());

    // Cross-check each group against a direct count.
    let total = store
        .execute("SELECT count(*) FROM policies")
        .await
        .expect("count failed");
    let total_policies = total.rows[0][0].as_i64().expect("integer count");
    let grouped_sum: i64 = rows
        .iter()
        .map(|row| row[1].as_i64().expect("integer count"))
        .sum();
    assert_eq!(grouped_sum, total_policies);

    let _ = fs::remove_file(path);
}

#[tokio::test]
async fn statements_without_result_sets_yield_empty_tables() {
    let (store, path) = temp_store("dml").await;
    store.reset().await.expect("reset failed");

    let result = store
        .execute("UPDATE prospects SET status = 'Contacted' WHERE status = 'New'")
        .await
        .expect("update failed");
    assert!(result.columns.is_empty());
    assert!(result.rows.is_empty());

    // A SELECT matching nothing still reports its column list.
    let empty = store
        .execute("SELECT first_name FROM customers WHERE 1 = 0")
        .await
        .expect("select failed");
    assert_eq!(empty.columns, vec!["first_name"]);
    assert!(empty.rows.is_empty());

    let _ = fs::remove_file(path);
}
