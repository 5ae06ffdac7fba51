//! Index page: upload form, filter form and task table

use axum::{extract::State, response::Html};
use mtt_common::dates::display_date;
use mtt_common::{StatusFilter, Task, TaskStatus};
use std::fmt::Write;

use super::{escape_html, page};
use crate::api::tasks::DEFAULT_WINDOW_DAYS;
use crate::error::ApiResult;
use crate::AppState;

/// GET /
///
/// In-progress tasks of the last week; the filter form re-queries
/// `/tasks` from the page script.
pub async fn index_page(State(state): State<AppState>) -> ApiResult<Html<String>> {
    let filter = StatusFilter::default();
    let tasks = state.store.list(filter, DEFAULT_WINDOW_DAYS).await?;
    Ok(Html(render_index(&tasks, filter, DEFAULT_WINDOW_DAYS)))
}

/// Table body rows for `tasks`
pub fn render_task_rows(tasks: &[Task]) -> String {
    let mut rows = String::new();
    for task in tasks {
        // Writing into a String cannot fail
        let _ = write!(
            rows,
            r#"<tr data-id="{id}">
    <td>{number}</td>
    <td>{meeting}</td>
    <td class="task-text">{text}</td>
    <td>{responsibles}</td>
    <td>{deadline}</td>
    <td>{comment}</td>
    <td>{status}</td>
    <td>{status_date}</td>
    <td class="actions"><a href="/edit/{id}">Edit</a> <button type="button" class="send-email" data-id="{id}">Send email</button></td>
</tr>
"#,
            id = task.id,
            number = escape_html(&task.task_number),
            meeting = escape_html(&display_date(&task.meeting_date)),
            text = escape_html(&task.task_text),
            responsibles = escape_html(&task.responsibles),
            deadline = escape_html(&display_date(&task.deadline)),
            comment = escape_html(&task.comment),
            status = escape_html(task.status.as_str()),
            status_date = escape_html(&display_date(&task.status_date)),
        );
    }
    rows
}

fn status_options(selected: StatusFilter) -> String {
    let choices = TaskStatus::ALL
        .into_iter()
        .map(StatusFilter::Only)
        .chain(std::iter::once(StatusFilter::All));

    let mut options = String::new();
    for choice in choices {
        let _ = write!(
            options,
            r#"<option value="{value}"{selected}>{value}</option>"#,
            value = choice.as_str(),
            selected = if choice == selected { " selected" } else { "" },
        );
    }
    options
}

/// Full index page
pub fn render_index(tasks: &[Task], filter: StatusFilter, days: i64) -> String {
    let body = format!(
        r#"<header>
    <h1>Meeting Tasks</h1>
</header>

<section class="upload">
    <form action="/upload" method="post" enctype="multipart/form-data">
        <input type="file" name="file" accept=".xlsx" required>
        <button type="submit">Upload</button>
    </form>
</section>

<section class="filter">
    <form id="filter-form">
        <label>Status
            <select name="status" id="filter-status">{options}</select>
        </label>
        <label>Days
            <input type="number" name="days" id="filter-days" min="0" value="{days}">
        </label>
        <button type="submit">Apply</button>
    </form>
</section>

<table id="tasks">
    <thead>
        <tr>
            <th>No.</th>
            <th>Meeting date</th>
            <th>Task</th>
            <th>Responsible</th>
            <th>Deadline</th>
            <th>Comment</th>
            <th>Status</th>
            <th>Status date</th>
            <th></th>
        </tr>
    </thead>
    <tbody>
{rows}    </tbody>
</table>
<p id="empty-note"{empty_hidden}>No tasks match the current filter.</p>

<script src="/static/tasks.js"></script>"#,
        options = status_options(filter),
        days = days,
        rows = render_task_rows(tasks),
        empty_hidden = if tasks.is_empty() { "" } else { " hidden" },
    );

    page("Meeting Tasks", &body)
}
