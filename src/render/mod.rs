//! Status line rendering.
//!
//! Segments are joined with ` | `. Empty sources drop their segment. The
//! default layout adds a second line with the task summary when work is
//! ready.

pub mod format;
pub mod theme;

pub use format::{format_pct, format_signed, format_tokens};
pub use theme::{Color, Theme};

use crate::config::Layout;
use crate::status::StatusData;

const SEPARATOR: &str = " | ";

/// Render `data` in `layout`.
pub fn render(data: &StatusData, layout: Layout, theme: &Theme) -> String {
    let mut segments = Vec::new();
    if !data.prefix.is_empty() {
        segments.push(theme.color(data.prefix_color).apply_to(&data.prefix).to_string());
    }
    segments.push(theme.model.apply_to(format!("[{}]", data.model)).to_string());
    segments.push(theme.dir.apply_to(format!("📁 {}", data.dir)).to_string());

    match layout {
        Layout::Default => {
            if let Some(branch) = branch_segment(data, theme, true) {
                segments.push(branch);
            }
            if let Some(status) = data.github_status {
                segments.push(status.emoji().to_string());
            }
            segments.extend(context_segment(data, theme));
            if !data.version.is_empty() {
                segments.push(theme.version.apply_to(format!("v{}", data.version)).to_string());
            }

            let mut line = segments.join(SEPARATOR);
            if let Some(tasks) = tasks_segment(data, theme) {
                line.push('\n');
                line.push_str(&tasks);
            }
            line
        }
        Layout::Tokens => {
            segments.extend(branch_segment(data, theme, false));
            if data.tokens_total > 0 {
                let tokens = format!(
                    "📈 In:{} Out:{} Cache:{}",
                    format_tokens(data.tokens_input),
                    format_tokens(data.tokens_output),
                    format_tokens(data.tokens_cached)
                );
                segments.push(theme.tokens.apply_to(tokens).to_string());
            }
            segments.extend(context_segment(data, theme));
            segments.join(SEPARATOR)
        }
        Layout::Tasks => {
            segments.extend(branch_segment(data, theme, false));
            segments.extend(context_segment(data, theme));
            segments.extend(tasks_segment(data, theme));
            segments.join(SEPARATOR)
        }
    }
}

/// `🌿 branch ±N`, optionally followed by line and file counters.
fn branch_segment(data: &StatusData, theme: &Theme, with_changes: bool) -> Option<String> {
    if data.git_branch.is_empty() {
        return None;
    }

    let mut label = format!("🌿 {}", data.git_branch);
    if !data.git_status.is_empty() {
        label.push(' ');
        label.push_str(&data.git_status);
    }
    let mut segment = theme.branch.apply_to(label).to_string();
    if !with_changes {
        return Some(segment);
    }

    if data.git_additions > 0 || data.git_deletions > 0 {
        segment.push_str(&format!(
            " {},{}",
            theme.additions.apply_to(format_signed(data.git_additions as i64)),
            theme.deletions.apply_to(format!("-{}", data.git_deletions))
        ));
    }
    if data.has_file_changes() {
        for (icon, count) in [
            ("✨", data.git_new_files),
            ("📝", data.git_modified_files),
            ("🗑", data.git_deleted_files),
            ("⚡", data.git_unstaged_files),
        ] {
            if count > 0 {
                segment.push_str(&format!(" {icon}{count}"));
            }
        }
    }
    Some(segment)
}

fn context_segment(data: &StatusData, theme: &Theme) -> Option<String> {
    let pct = data.context_pct_usable;
    if pct == 0.0 {
        return None;
    }
    Some(
        theme
            .context(pct)
            .apply_to(format!("📊 {}", format_pct(pct)))
            .to_string(),
    )
}

/// `📋 provider: N ready, M blocked. Next Up: title`, when anything is ready.
fn tasks_segment(data: &StatusData, theme: &Theme) -> Option<String> {
    if data.tasks_ready == 0 {
        return None;
    }

    let mut segment = theme
        .tasks
        .apply_to(format!("📋 {}: {} ready", data.task_provider, data.tasks_ready))
        .to_string();
    if data.tasks_blocked > 0 {
        segment.push_str(&format!(
            ", {}",
            theme.blocked.apply_to(format!("{} blocked", data.tasks_blocked))
        ));
    }
    if !data.tasks_next_task.is_empty() {
        segment.push_str(&format!(". Next Up: {}", data.tasks_next_task));
    }
    Some(segment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::BuildStatus;

    fn minimal() -> StatusData {
        StatusData {
            model: "Opus".into(),
            dir: "project".into(),
            ..StatusData::default()
        }
    }

    fn full() -> StatusData {
        StatusData {
            version: "1.0.80".into(),
            git_branch: "main".into(),
            git_status: "±3".into(),
            git_additions: 42,
            git_deletions: 7,
            git_new_files: 1,
            git_modified_files: 2,
            git_unstaged_files: 1,
            github_status: Some(BuildStatus::Success),
            tokens_input: 12_345,
            tokens_output: 678,
            tokens_cached: 1_500_000,
            tokens_total: 1_513_023,
            context_pct_usable: 45.23,
            has_tasks: true,
            task_provider: "tk".into(),
            tasks_ready: 3,
            tasks_blocked: 1,
            tasks_next_task: "Write docs".into(),
            ..minimal()
        }
    }

    fn plain(data: &StatusData, layout: Layout) -> String {
        render(data, layout, &Theme::plain())
    }

    #[test]
    fn minimal_default_line() {
        assert_eq!(plain(&minimal(), Layout::Default), "[Opus] | 📁 project");
    }

    #[test]
    fn full_default_layout() {
        assert_eq!(
            plain(&full(), Layout::Default),
            "[Opus] | 📁 project | 🌿 main ±3 +42,-7 ✨1 📝2 ⚡1 | ✅ | 📊 45.2% | v1.0.80\n\
             📋 tk: 3 ready, 1 blocked. Next Up: Write docs"
        );
    }

    #[test]
    fn prefix_leads_the_line() {
        let data = StatusData {
            prefix: "work".into(),
            prefix_color: Color::Magenta,
            ..minimal()
        };
        assert_eq!(plain(&data, Layout::Default), "work | [Opus] | 📁 project");
    }

    #[test]
    fn deletions_only_show_zero_additions() {
        let data = StatusData {
            git_branch: "dev".into(),
            git_deletions: 5,
            git_deleted_files: 1,
            ..minimal()
        };
        assert_eq!(plain(&data, Layout::Default), "[Opus] | 📁 project | 🌿 dev 0,-5 🗑1");
    }

    #[test]
    fn changes_hidden_without_branch() {
        let data = StatusData {
            git_additions: 10,
            git_new_files: 2,
            ..minimal()
        };
        assert_eq!(plain(&data, Layout::Default), "[Opus] | 📁 project");
    }

    #[test]
    fn task_line_needs_ready_work() {
        let data = StatusData {
            has_tasks: true,
            task_provider: "beads".into(),
            tasks_blocked: 4,
            tasks_next_task: "ignored".into(),
            ..minimal()
        };
        assert!(!plain(&data, Layout::Default).contains('\n'));

        let data = StatusData {
            tasks_ready: 2,
            ..data
        };
        assert_eq!(
            plain(&data, Layout::Default),
            "[Opus] | 📁 project\n📋 beads: 2 ready, 4 blocked. Next Up: ignored"
        );
    }

    #[test]
    fn tokens_layout() {
        assert_eq!(
            plain(&full(), Layout::Tokens),
            "[Opus] | 📁 project | 🌿 main ±3 | 📈 In:12.3k Out:678 Cache:1.5M | 📊 45.2%"
        );
    }

    #[test]
    fn tasks_layout() {
        assert_eq!(
            plain(&full(), Layout::Tasks),
            "[Opus] | 📁 project | 🌿 main ±3 | 📊 45.2% | 📋 tk: 3 ready, 1 blocked. Next Up: Write docs"
        );
    }

    #[test]
    fn colored_output_wraps_segments() {
        let line = render(&minimal(), Layout::Default, &Theme::colored());
        assert_eq!(
            line,
            "\u{1b}[36m[Opus]\u{1b}[0m | \u{1b}[34m📁 project\u{1b}[0m"
        );
    }

    #[test]
    fn context_color_follows_usage() {
        let data = StatusData {
            context_pct_usable: 85.0,
            ..minimal()
        };
        let line = render(&data, Layout::Default, &Theme::colored());
        assert!(line.contains("\u{1b}[31m📊 85.0%\u{1b}[0m"));
    }
}
