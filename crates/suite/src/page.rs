//! Page Object for the TodoMVC application
//!
//! Translates named user actions and queries into DOM operations against
//! one fixed page layout. Index parameters are 0-based positions within the
//! currently rendered list; every list-reading operation re-queries the DOM
//! rather than caching, because indices are unstable across any operation
//! that changes list membership or ordering.

use std::time::Duration;

use thirtyfour::{By, Key, WebDriver, WebElement};
use tracing::debug;

use todomvc_harness::error::{Error, Result};
use todomvc_harness::wait::Waiter;

const NEW_TODO_INPUT: &str = "input#todo-input";
const ROWS: &str = ".todo-list li";
const ROW_TOGGLES: &str = ".todo-list li input.toggle";
const ROW_DESTROY: &str = ".todo-list li button.destroy";
const COMPLETED_ROWS: &str = ".todo-list li.completed";
const ACTIVE_ROWS: &str = "//ul[@class='todo-list']//li[not(contains(@class, 'completed'))]";
const TOGGLE_ALL: &str = "input#toggle-all";
const CLEAR_COMPLETED: &str = "//button[normalize-space()='Clear completed']";
const FILTER_ALL: &str = "//a[normalize-space()='All']";
const FILTER_ACTIVE: &str = "//a[normalize-space()='Active']";
const FILTER_COMPLETED: &str = "//a[normalize-space()='Completed']";
const EDIT_FIELD: &str = ".todo-list li.editing .edit";
const EDIT_FIELD_FALLBACK: &str = ".todo-list li.editing input.new-todo";

const CLASS_ATTR: &str = "class";
const COMPLETED_CLASS: &str = "completed";

/// Ceiling for the first edit-field probe before falling back to a
/// synthetic activation event. The session implicit wait sets the effective
/// floor for one probe.
const ACTIVATION_WAIT: Duration = Duration::from_secs(2);

const SYNTHETIC_DBLCLICK: &str =
    "arguments[0].dispatchEvent(new MouseEvent('dblclick', { bubbles: true, cancelable: true, view: window }));";

/// Typed facade over the TodoMVC list
///
/// Holds a non-owning clone of the session's driver handle for the scope of
/// one suite run.
pub struct TodoPage {
    driver: WebDriver,
    waiter: Waiter,
}

impl TodoPage {
    pub fn new(driver: WebDriver) -> Self {
        debug!("Initialising TodoMVC page object");
        Self {
            driver,
            waiter: Waiter::default(),
        }
    }

    /// Submit a new todo via the input field
    ///
    /// The application trims leading and trailing whitespace before storing
    /// the text; the effect is observed through subsequent count and text
    /// queries.
    pub async fn add_item(&self, text: &str) -> Result<()> {
        debug!("Adding todo item: {:?}", text);
        let input = self.driver.find(By::Css(NEW_TODO_INPUT)).await?;
        input.send_keys(format!("{text}\n")).await?;
        Ok(())
    }

    /// Number of items currently rendered, under whichever filter view is
    /// active
    pub async fn item_count(&self) -> Result<usize> {
        Ok(self.rows().await?.len())
    }

    /// Rendered text of the item at `index`
    pub async fn item_text(&self, index: usize) -> Result<String> {
        debug!("Reading text of todo item at index {}", index);
        Ok(self.row(index).await?.text().await?)
    }

    /// Toggle the completed state of the item at `index`
    ///
    /// This is a toggle, not a set: calling it twice returns the item to
    /// its prior state.
    pub async fn complete_item(&self, index: usize) -> Result<()> {
        debug!("Toggling completion of todo item at index {}", index);
        let toggles = self.driver.find_all(By::Css(ROW_TOGGLES)).await?;
        let len = toggles.len();
        match toggles.into_iter().nth(index) {
            Some(toggle) => {
                toggle.click().await?;
                Ok(())
            }
            None => Err(Error::IndexOutOfRange { index, len }),
        }
    }

    /// Whether the item at `index` carries the completed flag
    pub async fn is_completed(&self, index: usize) -> Result<bool> {
        let row = self.row(index).await?;
        has_completed_class(&row).await
    }

    /// Flip every visible item through the toggle-all control
    ///
    /// The control is a toggle: when every item is already completed,
    /// invoking it flips all of them back to active.
    pub async fn mark_all_completed(&self) -> Result<()> {
        debug!("Clicking the toggle-all control");
        self.driver.find(By::Css(TOGGLE_ALL)).await?.click().await?;
        Ok(())
    }

    /// True iff every currently rendered item carries the completed flag
    pub async fn is_all_completed(&self) -> Result<bool> {
        for row in self.rows().await? {
            if !has_completed_class(&row).await? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Delete the item at `index`
    ///
    /// The delete control is only interactive while its row is hovered, so
    /// this hovers the row and then waits for the control to become
    /// clickable within the bounded wait.
    pub async fn delete_item(&self, index: usize) -> Result<()> {
        debug!("Deleting todo item at index {}", index);
        let row = self.row(index).await?;
        self.driver
            .action_chain()
            .move_to_element_center(&row)
            .perform()
            .await?;

        let driver = self.driver.clone();
        let destroy = self
            .waiter
            .until("delete control to become clickable", move || {
                let driver = driver.clone();
                async move {
                    let buttons = driver.find_all(By::Css(ROW_DESTROY)).await?;
                    match buttons.into_iter().nth(index) {
                        Some(button) => {
                            if button.is_displayed().await? && button.is_enabled().await? {
                                Ok(Some(button))
                            } else {
                                Ok(None)
                            }
                        }
                        None => Ok(None),
                    }
                }
            })
            .await?;
        destroy.click().await?;
        Ok(())
    }

    /// Invoke the bulk clear-completed control, then sweep
    ///
    /// The bulk control is unreliable against this UI, so anything still
    /// flagged completed afterwards is deleted explicitly. Indices are
    /// re-resolved after every deletion.
    pub async fn clear_completed(&self) -> Result<()> {
        debug!("Clearing completed todo items");
        let button = self.driver.find(By::XPath(CLEAR_COMPLETED)).await?;
        button.click().await?;

        loop {
            let rows = self.rows().await?;
            let mut target = None;
            for (index, row) in rows.iter().enumerate() {
                if has_completed_class(row).await? {
                    target = Some(index);
                    break;
                }
            }
            match target {
                Some(index) => self.delete_item(index).await?,
                None => break,
            }
        }
        Ok(())
    }

    /// Delete rows until the list is empty
    pub async fn delete_all(&self) -> Result<()> {
        debug!("Deleting every todo item");
        while !self.rows().await?.is_empty() {
            self.delete_item(0).await?;
        }
        Ok(())
    }

    /// Switch the view to completed items only
    pub async fn filter_completed(&self) -> Result<()> {
        debug!("Switching to the Completed filter");
        self.driver.find(By::XPath(FILTER_COMPLETED)).await?.click().await?;
        Ok(())
    }

    /// Switch the view to active items only
    pub async fn filter_active(&self) -> Result<()> {
        debug!("Switching to the Active filter");
        self.driver.find(By::XPath(FILTER_ACTIVE)).await?.click().await?;
        Ok(())
    }

    /// Switch the view back to all items
    pub async fn filter_all(&self) -> Result<()> {
        debug!("Switching to the All filter");
        self.driver.find(By::XPath(FILTER_ALL)).await?.click().await?;
        Ok(())
    }

    /// Number of rendered rows carrying the completed flag
    ///
    /// Queries its own selector over whatever the active filter has
    /// rendered; it is not reconciled with the filter view.
    pub async fn completed_count(&self) -> Result<usize> {
        Ok(self.driver.find_all(By::Css(COMPLETED_ROWS)).await?.len())
    }

    /// Number of rendered rows without the completed flag
    ///
    /// Same caveat as [`completed_count`](Self::completed_count): an
    /// independent selector over the rendered list.
    pub async fn active_count(&self) -> Result<usize> {
        Ok(self.driver.find_all(By::XPath(ACTIVE_ROWS)).await?.len())
    }

    /// Replace the text of the item at `index`
    ///
    /// Activates edit mode with a double-click, falling back to a synthetic
    /// dblclick event when the native one does not take. Fails with a
    /// timeout if the edit field never appears.
    pub async fn edit_item(&self, index: usize, new_text: &str) -> Result<()> {
        debug!("Editing todo item at index {} to {:?}", index, new_text);
        let row = self.row(index).await?;
        self.driver
            .action_chain()
            .double_click_element(&row)
            .perform()
            .await?;

        let edit = match self.find_edit_field(ACTIVATION_WAIT).await {
            Ok(edit) => edit,
            Err(Error::Timeout { .. }) => {
                let label = row.find(By::Css("label")).await?;
                self.driver
                    .execute(SYNTHETIC_DBLCLICK, vec![label.to_json()?])
                    .await?;
                self.find_edit_field(self.waiter.timeout()).await?
            }
            Err(e) => return Err(e),
        };

        edit.send_keys(Key::Control + "a").await?;
        edit.send_keys(Key::Backspace + "").await?;
        edit.send_keys(new_text).await?;
        edit.send_keys(Key::Enter + "").await?;
        Ok(())
    }

    /// Resolve the item at `index` to a handle on its row element
    ///
    /// The handle addresses the row through the driver's opaque element
    /// reference rather than a position, so it stays valid while the row
    /// itself survives reordering.
    pub async fn item(&self, index: usize) -> Result<TodoItem> {
        let row = self.row(index).await?;
        Ok(self.wrap(row))
    }

    /// Resolve an item by its rendered text
    pub async fn find_item(&self, text: &str) -> Result<Option<TodoItem>> {
        for row in self.rows().await? {
            if row.text().await? == text {
                return Ok(Some(self.wrap(row)));
            }
        }
        Ok(None)
    }

    async fn rows(&self) -> Result<Vec<WebElement>> {
        Ok(self.driver.find_all(By::Css(ROWS)).await?)
    }

    async fn row(&self, index: usize) -> Result<WebElement> {
        let rows = self.rows().await?;
        let len = rows.len();
        rows.into_iter()
            .nth(index)
            .ok_or(Error::IndexOutOfRange { index, len })
    }

    async fn find_edit_field(&self, timeout: Duration) -> Result<WebElement> {
        let driver = self.driver.clone();
        Waiter::with_timeout(timeout)
            .until("edit field to appear", move || {
                let driver = driver.clone();
                async move {
                    for selector in [EDIT_FIELD, EDIT_FIELD_FALLBACK] {
                        let mut found = driver.find_all(By::Css(selector)).await?;
                        if let Some(field) = found.pop() {
                            return Ok(Some(field));
                        }
                    }
                    Ok(None)
                }
            })
            .await
    }

    fn wrap(&self, row: WebElement) -> TodoItem {
        TodoItem {
            driver: self.driver.clone(),
            row,
            waiter: self.waiter,
        }
    }
}

/// Handle to one todo row, addressed by element reference rather than
/// position
pub struct TodoItem {
    driver: WebDriver,
    row: WebElement,
    waiter: Waiter,
}

impl TodoItem {
    /// Rendered text of this row
    pub async fn text(&self) -> Result<String> {
        Ok(self.row.text().await?)
    }

    /// Whether this row carries the completed flag
    pub async fn is_completed(&self) -> Result<bool> {
        has_completed_class(&self.row).await
    }

    /// Toggle this row's completed state
    pub async fn toggle(&self) -> Result<()> {
        self.row.find(By::Css("input.toggle")).await?.click().await?;
        Ok(())
    }

    /// Delete this row, hovering it first to reveal the delete control
    pub async fn delete(&self) -> Result<()> {
        self.driver
            .action_chain()
            .move_to_element_center(&self.row)
            .perform()
            .await?;

        let row = self.row.clone();
        let destroy = self
            .waiter
            .until("delete control to become clickable", move || {
                let row = row.clone();
                async move {
                    let button = row.find(By::Css("button.destroy")).await?;
                    if button.is_displayed().await? && button.is_enabled().await? {
                        Ok(Some(button))
                    } else {
                        Ok(None)
                    }
                }
            })
            .await?;
        destroy.click().await?;
        Ok(())
    }
}

async fn has_completed_class(row: &WebElement) -> Result<bool> {
    Ok(row
        .attr(CLASS_ATTR)
        .await?
        .map(|class| class.contains(COMPLETED_CLASS))
        .unwrap_or(false))
}
