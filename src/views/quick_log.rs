//! Quick log page

use std::fmt::Write;

use super::page;
use crate::forms::DEFAULT_SCORE;
use crate::intake::{SCORE_MAX, SCORE_MIN};
use crate::models::Stage;

pub fn render() -> String {
    let mut stages = String::new();
    for stage in Stage::ALL {
        let selected = if stage == Stage::default() { " selected" } else { "" };
        let _ = write!(
            stages,
            "<option value=\"{}\"{}>{}</option>",
            stage.as_str(),
            selected,
            stage.label()
        );
    }

    let body = format!(
        "<main class=\"page narrow\">\n\
         <h1>Quick Log</h1>\n\
         <form id=\"quick-log\" class=\"stack\">\n\
         <label>Project <input name=\"project\" required autocomplete=\"off\"></label>\n\
         <label>Stage <select name=\"stage\">{stages}</select></label>\n\
         <label>Summary <textarea name=\"summary\" rows=\"3\" required></textarea></label>\n\
         <label>Energy <input name=\"energy_level\" type=\"number\" min=\"{min}\" max=\"{max}\" value=\"{default}\"></label>\n\
         <label>Leverage <input name=\"leverage_score\" type=\"number\" min=\"{min}\" max=\"{max}\" value=\"{default}\"></label>\n\
         <button type=\"submit\" class=\"primary\">Save log</button>\n\
         <p id=\"quick-log-message\" role=\"status\"></p>\n\
         </form>\n\
         </main>",
        stages = stages,
        min = SCORE_MIN,
        max = SCORE_MAX,
        default = DEFAULT_SCORE,
    );
    page("Quick Log", &body, &["quick_log.js"])
}
