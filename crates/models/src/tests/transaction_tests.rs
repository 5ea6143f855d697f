use anyhow::Result;
use sea_orm::{EntityTrait, PaginatorTrait, TransactionTrait};

use super::setup_test_db;
use crate::{course, enrollment, student};

/// Test basic transaction commit
#[tokio::test]
async fn test_transaction_commit() -> Result<()> {
    let db = setup_test_db().await?;

    let txn = db.begin().await?;
    let created = student::create(&txn, "TX1", "Commit", None).await?;
    txn.commit().await?;

    let found = student::Entity::find_by_id(created.student_id).one(&db).await?;
    assert_eq!(found.map(|s| s.roll_number), Some("TX1".to_string()));
    Ok(())
}

/// Test transaction rollback
#[tokio::test]
async fn test_transaction_rollback() -> Result<()> {
    let db = setup_test_db().await?;

    let txn = db.begin().await?;
    let s = student::create(&txn, "TX2", "Rollback", None).await?;
    let c = course::create(&txn, "C1", "Math", None).await?;
    enrollment::create(&txn, s.student_id, c.course_id).await?;
    txn.rollback().await?;

    assert!(student::find_by_roll_number(&db, "TX2").await?.is_none());
    assert_eq!(course::Entity::find().count(&db).await?, 0);
    assert_eq!(enrollment::Entity::find().count(&db).await?, 0);
    Ok(())
}

/// Dropping a transaction without commit discards its writes
#[tokio::test]
async fn test_transaction_dropped_without_commit() -> Result<()> {
    let db = setup_test_db().await?;
    {
        let txn = db.begin().await?;
        student::create(&txn, "TX3", "Dropped", None).await?;
    }
    assert!(student::find_by_roll_number(&db, "TX3").await?.is_none());
    Ok(())
}
