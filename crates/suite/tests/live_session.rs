//! Live smoke tests against the real TodoMVC deployment

use todomvc_suite::{AppConfig, TodoContext};

#[tokio::test]
#[ignore] // Requires chromedriver and network access to the TodoMVC deployment
async fn session_opens_and_closes_cleanly() {
    let mut ctx = TodoContext::open(AppConfig::default()).await.unwrap();
    assert_eq!(ctx.page().item_count().await.unwrap(), 0);

    ctx.close().await.unwrap();
    // Teardown without a session is a no-op
    ctx.close().await.unwrap();
}

#[tokio::test]
#[ignore] // Requires chromedriver and network access to the TodoMVC deployment
async fn add_and_delete_round_trip() {
    let mut ctx = TodoContext::open(AppConfig::default()).await.unwrap();

    {
        let page = ctx.page();
        page.add_item("smoke test entry").await.unwrap();
        assert_eq!(page.item_text(0).await.unwrap(), "smoke test entry");
        assert!(!page.is_completed(0).await.unwrap());

        page.delete_item(0).await.unwrap();
        assert_eq!(page.item_count().await.unwrap(), 0);
    }

    ctx.close().await.unwrap();
}
