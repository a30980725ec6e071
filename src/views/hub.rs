//! Project hub list page

use std::fmt::Write;

use super::{escape, page};
use crate::models::{progress_width, resolve_launch_path, DeviceType, Project};

/// What the list page has to show
#[derive(Debug)]
pub enum HubListing {
    /// No database configured
    Unconfigured,
    Projects(Vec<Project>),
}

pub fn render(listing: &HubListing, device: DeviceType) -> String {
    let content = match listing {
        HubListing::Unconfigured => config_missing(),
        HubListing::Projects(projects) if projects.is_empty() => {
            "<p class=\"muted\">No projects yet. Add rows to the <code>projects</code> table.</p>"
                .to_string()
        }
        HubListing::Projects(projects) => {
            let mut grid = String::from("<div class=\"grid\">\n");
            for project in projects {
                grid.push_str(&card(project, device));
            }
            grid.push_str("</div>\n");
            grid
        }
    };

    let body = format!(
        "<main class=\"page\">\n<h1>Project Hub</h1>\n{}{}</main>",
        content,
        MODAL
    );
    page("Project Hub", &body, &["hub.js"])
}

fn config_missing() -> String {
    "<p class=\"warning\"><strong>Storage is not configured.</strong> \
     Set <code>BUILDER_HUB_DATABASE</code> (or <code>[storage] database</code> in \
     <code>builder-hub.toml</code>) and restart the server.</p>\n"
        .to_string()
}

/// One project card. Everything the modal needs travels in data attributes.
pub fn card(project: &Project, device: DeviceType) -> String {
    let mut attrs = format!(
        " data-id=\"{}\" data-title=\"{}\" data-status=\"{}\"",
        escape(&project.id),
        escape(project.display_title()),
        escape(project.status.as_deref().unwrap_or_default()),
    );
    if let Some(url) = project.embeddable_doc_url() {
        let _ = write!(attrs, " data-doc-url=\"{}\"", escape(url));
    }
    if let Some(path) = resolve_launch_path(project, device) {
        let _ = write!(attrs, " data-launch-path=\"{}\"", escape(path));
    }

    format!(
        "<article class=\"card\" tabindex=\"0\"{attrs}>\n\
         <h2>{title}</h2>\n\
         <p class=\"muted\">{status}</p>\n\
         <div class=\"progress\"><div class=\"progress-fill\" style=\"width: {width}%\"></div></div>\n\
         <a class=\"card-link\" href=\"/hub/{href}\">Open</a>\n\
         </article>\n",
        attrs = attrs,
        title = escape(project.display_title()),
        status = escape(project.status.as_deref().unwrap_or_default()),
        width = progress_width(project.progress),
        href = urlencoding::encode(&project.id),
    )
}

const MODAL: &str = r#"
<div id="project-modal" class="modal-backdrop" role="dialog" aria-modal="true" aria-label="Project detail" hidden>
  <div class="modal">
    <div class="modal-header">
      <h2 id="modal-title"></h2>
      <button type="button" class="modal-close" aria-label="Close">&#x2715;</button>
    </div>
    <p id="modal-status" class="muted"></p>
    <div id="modal-doc" hidden>
      <input id="modal-doc-url" readonly>
      <button type="button" id="modal-copy" class="secondary">Copy doc URL</button>
    </div>
    <button type="button" id="modal-launch" class="primary launch-button">Launch Cursor</button>
    <p class="hint">Docs open by copying the URL, which avoids popup blockers.</p>
  </div>
</div>
"#;
