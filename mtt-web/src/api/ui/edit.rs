//! Edit page: comment and status of a single task

use axum::{
    extract::{Path, State},
    response::Html,
};
use mtt_common::dates::display_date;
use mtt_common::{Task, TaskStatus};

use super::{escape_html, page};
use crate::error::{parse_task_id, ApiError, ApiResult};
use crate::AppState;

/// GET /edit/:id
pub async fn edit_page(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> ApiResult<Html<String>> {
    let id = parse_task_id(&raw_id)?;
    let task = state
        .store
        .get(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    Ok(Html(render_edit(&task)))
}

/// Edit form posting to `/update/{id}`
pub fn render_edit(task: &Task) -> String {
    let options: String = TaskStatus::ALL
        .into_iter()
        .map(|status| {
            format!(
                r#"<option value="{value}"{selected}>{value}</option>"#,
                value = status.as_str(),
                selected = if status == task.status { " selected" } else { "" },
            )
        })
        .collect();

    let body = format!(
        r#"<header>
    <h1>Edit task {number}</h1>
    <a href="/">Back to list</a>
</header>

<dl class="task-details">
    <dt>Meeting date</dt><dd>{meeting}</dd>
    <dt>Task</dt><dd>{text}</dd>
    <dt>Responsible</dt><dd>{responsibles}</dd>
    <dt>Deadline</dt><dd>{deadline}</dd>
    <dt>Status date</dt><dd>{status_date}</dd>
</dl>

<form action="/update/{id}" method="post" class="edit-form">
    <label>Comment
        <textarea name="comment" rows="4">{comment}</textarea>
    </label>
    <label>Status
        <select name="status">{options}</select>
    </label>
    <button type="submit">Save</button>
</form>"#,
        id = task.id,
        number = escape_html(&task.task_number),
        meeting = escape_html(&display_date(&task.meeting_date)),
        text = escape_html(&task.task_text),
        responsibles = escape_html(&task.responsibles),
        deadline = escape_html(&display_date(&task.deadline)),
        status_date = escape_html(&display_date(&task.status_date)),
        comment = escape_html(&task.comment),
        options = options,
    );

    page("Edit task", &body)
}
