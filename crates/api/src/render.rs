//! Server-rendered HTML for the group configurations index page.

use std::fmt::Write;

use studio_core::group_configuration::GroupConfiguration;
use studio_db::models::course::Course;

/// Label of the control that starts a new configuration.
pub const NEW_CONFIGURATION_LABEL: &str = "New Group Configuration";

/// Render the index page for a course's group configurations.
///
/// The "new" control is always present, including when the list is empty.
pub fn group_configurations_page(course: &Course, configurations: &[GroupConfiguration]) -> String {
    let title = format!("Group Configurations | {}", escape(&course.display_name));
    let mut html = String::new();

    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head><meta charset=\"utf-8\"><title>{title}</title></head>\n\
         <body>\n<main class=\"group-configurations\" data-course-key=\"{key}\">\n\
         <h1>Group Configurations</h1>\n\
         <button type=\"button\" class=\"new-button\" data-action=\"new-group-configuration\">{NEW_CONFIGURATION_LABEL}</button>\n",
        key = escape(&course.course_key),
    );

    if configurations.is_empty() {
        html.push_str("<p class=\"no-content\">You haven't created any group configurations yet.</p>\n");
    } else {
        html.push_str("<ul class=\"group-configurations-list\">\n");
        for config in configurations {
            write_configuration(&mut html, config);
        }
        html.push_str("</ul>\n");
    }

    html.push_str("</main>\n</body>\n</html>\n");
    html
}

fn write_configuration(html: &mut String, config: &GroupConfiguration) {
    let _ = write!(
        html,
        "<li class=\"group-configuration\" id=\"group-configuration-{id}\" data-id=\"{id}\">\n\
         <h2 class=\"name\">{name}</h2>\n",
        id = config.id,
        name = escape(&config.name),
    );
    if let Some(description) = &config.description {
        let _ = writeln!(html, "<p class=\"description\">{}</p>", escape(description));
    }
    let _ = writeln!(
        html,
        "<p class=\"group-count\">Contains {} groups</p>",
        config.groups.len()
    );
    html.push_str("<ol class=\"groups\">\n");
    for group in &config.groups {
        let _ = writeln!(
            html,
            "<li class=\"group\" data-id=\"{}\">{}</li>",
            group.id,
            escape(&group.name)
        );
    }
    html.push_str("</ol>\n</li>\n");
}

/// Escape text for use in element content and double-quoted attributes.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
