//! The ordered TodoMVC scenarios
//!
//! Scenarios run in the declared order against one shared context and one
//! accumulating todo list: later scenarios depend on the cumulative effect
//! of everything before them. That coupling is deliberate — state is not
//! reset between scenarios.

use todomvc_harness::runner::{Scenario, ScenarioFuture};
use todomvc_harness::{check, check_eq};

use crate::context::TodoContext;

const LONG_TASK_TEXT: &str =
    "this is supposed to be a very long task and you have to perform it in very less time";

/// Every scenario, in execution order
pub fn all() -> Vec<Scenario<TodoContext>> {
    vec![
        Scenario::new("add_single_item", add_single_item),
        Scenario::new("add_multiple_items", add_multiple_items),
        Scenario::new("complete_first_item", complete_first_item),
        Scenario::new("mark_all_as_completed", mark_all_as_completed),
        Scenario::new("delete_first_item", delete_first_item),
        Scenario::new("clear_completed_removes_done_items", clear_completed_removes_done_items),
        Scenario::new("completed_filter_counts", completed_filter_counts),
        Scenario::new("active_filter_counts", active_filter_counts),
        Scenario::new("all_filter_shows_every_item", all_filter_shows_every_item),
        Scenario::new("toggle_all_from_mixed_completes_all", toggle_all_from_mixed_completes_all),
        Scenario::new("toggle_all_inverts_when_all_done", toggle_all_inverts_when_all_done),
        Scenario::new("counts_after_deleting_completed_item", counts_after_deleting_completed_item),
        Scenario::new("counts_after_deleting_active_item", counts_after_deleting_active_item),
        Scenario::new("long_text_round_trips", long_text_round_trips),
        Scenario::new("surrounding_whitespace_is_trimmed", surrounding_whitespace_is_trimmed),
        Scenario::new("special_characters_round_trip", special_characters_round_trip),
        Scenario::new("duplicate_items_are_allowed", duplicate_items_are_allowed),
        Scenario::new("complete_toggle_is_reversible", complete_toggle_is_reversible),
        Scenario::new("edit_item_replaces_text", edit_item_replaces_text),
        Scenario::new("item_handles_resolve_by_text", item_handles_resolve_by_text),
    ]
}

fn add_single_item(ctx: &mut TodoContext) -> ScenarioFuture<'_> {
    Box::pin(async move {
        let page = ctx.page();
        page.add_item("Buy groceries").await?;
        check_eq!(page.item_count().await?, 1, "todo count after first add");
        Ok(())
    })
}

fn add_multiple_items(ctx: &mut TodoContext) -> ScenarioFuture<'_> {
    Box::pin(async move {
        let page = ctx.page();
        page.add_item("Read book").await?;
        page.add_item("Go for a walk").await?;
        check_eq!(page.item_count().await?, 3, "todo count after three adds");
        Ok(())
    })
}

fn complete_first_item(ctx: &mut TodoContext) -> ScenarioFuture<'_> {
    Box::pin(async move {
        let page = ctx.page();
        page.complete_item(0).await?;
        check!(page.is_completed(0).await?, "first item marked completed");
        Ok(())
    })
}

fn mark_all_as_completed(ctx: &mut TodoContext) -> ScenarioFuture<'_> {
    Box::pin(async move {
        let page = ctx.page();
        page.mark_all_completed().await?;
        check!(page.is_all_completed().await?, "every item marked completed");
        Ok(())
    })
}

fn delete_first_item(ctx: &mut TodoContext) -> ScenarioFuture<'_> {
    Box::pin(async move {
        let page = ctx.page();
        page.delete_item(0).await?;
        check_eq!(page.item_count().await?, 2, "todo count after deletion");
        Ok(())
    })
}

fn clear_completed_removes_done_items(ctx: &mut TodoContext) -> ScenarioFuture<'_> {
    Box::pin(async move {
        let page = ctx.page();
        check_eq!(page.item_count().await?, 2, "todo count before clearing");
        page.complete_item(0).await?;
        page.clear_completed().await?;
        check_eq!(page.item_count().await?, 1, "todo count after clearing completed");
        Ok(())
    })
}

fn completed_filter_counts(ctx: &mut TodoContext) -> ScenarioFuture<'_> {
    Box::pin(async move {
        let page = ctx.page();
        check_eq!(page.completed_count().await?, 0, "completed count before toggling");
        page.complete_item(0).await?;
        page.filter_completed().await?;
        check_eq!(page.completed_count().await?, 1, "completed count under Completed filter");
        check_eq!(page.active_count().await?, 0, "active count under Completed filter");
        Ok(())
    })
}

fn active_filter_counts(ctx: &mut TodoContext) -> ScenarioFuture<'_> {
    Box::pin(async move {
        let page = ctx.page();
        page.add_item("go for a spin").await?;
        page.add_item("watch movie").await?;
        page.filter_active().await?;
        check!(page.active_count().await? > 0, "active items under Active filter");
        check_eq!(page.completed_count().await?, 0, "completed count under Active filter");
        Ok(())
    })
}

fn all_filter_shows_every_item(ctx: &mut TodoContext) -> ScenarioFuture<'_> {
    Box::pin(async move {
        let page = ctx.page();
        page.filter_all().await?;
        check!(page.item_count().await? > 0, "items visible under All filter");
        Ok(())
    })
}

fn toggle_all_from_mixed_completes_all(ctx: &mut TodoContext) -> ScenarioFuture<'_> {
    Box::pin(async move {
        let page = ctx.page();
        page.mark_all_completed().await?;
        check!(page.completed_count().await? > 0, "completed items after toggle-all");
        check!(page.item_count().await? > 0, "items still present");
        check_eq!(page.active_count().await?, 0, "no active items remain");
        Ok(())
    })
}

// The toggle-all control inverts when everything is already complete; this
// ordering is run back to back with the one above on purpose.
fn toggle_all_inverts_when_all_done(ctx: &mut TodoContext) -> ScenarioFuture<'_> {
    Box::pin(async move {
        let page = ctx.page();
        page.mark_all_completed().await?;
        check_eq!(page.completed_count().await?, 0, "completed count after inverting");
        check!(page.item_count().await? > 0, "items still present");
        check!(page.active_count().await? > 0, "items flipped back to active");
        Ok(())
    })
}

fn counts_after_deleting_completed_item(ctx: &mut TodoContext) -> ScenarioFuture<'_> {
    Box::pin(async move {
        let page = ctx.page();
        page.add_item("this is good").await?;
        page.add_item("this is really good").await?;
        page.complete_item(0).await?;
        page.complete_item(1).await?;
        page.delete_item(0).await?;
        check_eq!(page.completed_count().await?, 1, "completed count after deleting one");
        check!(page.item_count().await? > 0, "items still present");
        check!(page.active_count().await? > 0, "active items still present");
        Ok(())
    })
}

fn counts_after_deleting_active_item(ctx: &mut TodoContext) -> ScenarioFuture<'_> {
    Box::pin(async move {
        let page = ctx.page();
        page.add_item("this is good").await?;
        page.complete_item(0).await?;
        page.delete_item(2).await?;
        check_eq!(page.completed_count().await?, 0, "completed count after toggling and deleting");
        check!(page.item_count().await? > 0, "items still present");
        check_eq!(page.active_count().await?, 4, "active count after deleting an active item");
        Ok(())
    })
}

fn long_text_round_trips(ctx: &mut TodoContext) -> ScenarioFuture<'_> {
    Box::pin(async move {
        let page = ctx.page();
        page.mark_all_completed().await?;
        check!(page.is_all_completed().await?, "toggle-all completed everything");
        page.clear_completed().await?;
        page.add_item(LONG_TASK_TEXT).await?;
        check_eq!(page.item_text(0).await?, LONG_TASK_TEXT, "long text round-trip");
        Ok(())
    })
}

fn surrounding_whitespace_is_trimmed(ctx: &mut TodoContext) -> ScenarioFuture<'_> {
    Box::pin(async move {
        let page = ctx.page();
        page.mark_all_completed().await?;
        page.clear_completed().await?;
        page.add_item("  This is new task  ").await?;
        check_eq!(page.item_text(0).await?, "This is new task", "stored text is trimmed");
        Ok(())
    })
}

fn special_characters_round_trip(ctx: &mut TodoContext) -> ScenarioFuture<'_> {
    Box::pin(async move {
        let page = ctx.page();
        page.mark_all_completed().await?;
        page.clear_completed().await?;
        page.add_item("!@#$%^").await?;
        check_eq!(page.item_text(0).await?, "!@#$%^", "special characters round-trip");
        Ok(())
    })
}

fn duplicate_items_are_allowed(ctx: &mut TodoContext) -> ScenarioFuture<'_> {
    Box::pin(async move {
        let page = ctx.page();
        page.mark_all_completed().await?;
        page.clear_completed().await?;
        page.add_item("test1").await?;
        page.add_item("test1").await?;
        check_eq!(page.item_count().await?, 2, "duplicate text stored twice");
        Ok(())
    })
}

fn complete_toggle_is_reversible(ctx: &mut TodoContext) -> ScenarioFuture<'_> {
    Box::pin(async move {
        let page = ctx.page();
        page.mark_all_completed().await?;
        page.clear_completed().await?;
        page.add_item("test1").await?;
        page.complete_item(0).await?;
        page.complete_item(0).await?;
        check_eq!(page.completed_count().await?, 0, "double toggle restores active state");
        Ok(())
    })
}

fn edit_item_replaces_text(ctx: &mut TodoContext) -> ScenarioFuture<'_> {
    Box::pin(async move {
        let page = ctx.page();
        page.delete_all().await?;
        page.add_item("Draft the weekly summary").await?;
        page.edit_item(0, "Send the weekly summary").await?;
        check_eq!(
            page.item_text(0).await?,
            "Send the weekly summary",
            "edited text replaces the original"
        );
        Ok(())
    })
}

fn item_handles_resolve_by_text(ctx: &mut TodoContext) -> ScenarioFuture<'_> {
    Box::pin(async move {
        let page = ctx.page();
        page.delete_all().await?;
        page.add_item("alpha").await?;
        page.add_item("beta").await?;

        check!(page.find_item("missing").await?.is_none(), "absent text resolves to nothing");

        let beta = match page.find_item("beta").await? {
            Some(item) => item,
            None => {
                return Err(todomvc_harness::Error::Assertion(
                    "item 'beta' not found by text".into(),
                ))
            }
        };
        beta.toggle().await?;
        check!(beta.is_completed().await?, "handle observes its own toggle");
        check!(page.is_completed(1).await?, "positional query agrees with the handle");
        check_eq!(page.completed_count().await?, 1, "one completed item after toggling");
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn scenario_names_are_unique() {
        let scenarios = all();
        let names: HashSet<_> = scenarios.iter().map(|s| s.name).collect();
        assert_eq!(names.len(), scenarios.len());
    }

    #[test]
    fn declared_order_is_stable() {
        let scenarios = all();
        assert_eq!(scenarios.len(), 20);
        assert_eq!(scenarios[0].name, "add_single_item");
        assert_eq!(scenarios[4].name, "delete_first_item");
        assert_eq!(scenarios[19].name, "item_handles_resolve_by_text");
    }
}
