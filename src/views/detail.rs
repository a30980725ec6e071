//! Project detail page

use super::{escape, page};
use crate::models::{progress_width, resolve_launch_path, DeviceType, Project};

pub fn render(project: &Project, device: DeviceType) -> String {
    let title = project.display_title();

    let doc = match (project.embeddable_doc_url(), project.doc_url.as_deref()) {
        (Some(url), _) => format!(
            "<iframe class=\"doc-frame\" src=\"{}\" title=\"{} document\"></iframe>",
            escape(url),
            escape(title)
        ),
        (None, Some(url)) if !url.trim().is_empty() => {
            "<div class=\"doc-placeholder\">Enter a valid doc URL (must start with http)</div>"
                .to_string()
        }
        (None, _) => "<div class=\"doc-placeholder\">No doc URL</div>".to_string(),
    };

    let launch = match resolve_launch_path(project, device) {
        Some(path) => format!(
            "<button type=\"button\" class=\"primary launch-button\" data-launch-path=\"{}\">Launch Cursor</button>",
            escape(path)
        ),
        None => "<button type=\"button\" class=\"primary launch-button\" disabled \
                 title=\"No local path for this device\">Launch Cursor</button>"
            .to_string(),
    };

    let body = format!(
        "<main class=\"page detail\">\n\
         <p><a href=\"/hub\">&larr; All projects</a></p>\n\
         <h1>{title}</h1>\n\
         <p class=\"muted\">{status}</p>\n\
         <div class=\"progress\"><div class=\"progress-fill\" style=\"width: {width}%\"></div></div>\n\
         {launch}\n\
         {doc}\n\
         </main>",
        title = escape(title),
        status = escape(project.status.as_deref().unwrap_or_default()),
        width = progress_width(project.progress),
        launch = launch,
        doc = doc,
    );
    page(title, &body, &["hub.js"])
}
