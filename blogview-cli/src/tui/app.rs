//! Viewer state: post list, filter, selection and body scroll

use blogview_core::{IndexReport, Post};

/// Input mode for the viewer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Navigate the list and scroll the body
    #[default]
    Normal,
    /// Typing into the key filter
    Filter,
}

/// A post as shown in the list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostEntry {
    pub key: String,
    /// Title from the front matter, if any
    pub title: Option<String>,
}

/// Main application state
#[derive(Debug)]
pub struct App {
    /// Heading above the post list
    pub title: String,
    pub mode: Mode,
    /// All posts in index order
    pub entries: Vec<PostEntry>,
    /// Substring filter on keys
    pub filter: String,
    /// Selected index into the filtered list
    pub selected_index: usize,
    /// First visible body line
    pub body_scroll: usize,
    /// Line count of the body currently shown
    pub body_len: usize,
    /// Show front matter above the body
    pub show_front_matter: bool,
    /// Files skipped by the last indexing pass
    pub skipped_count: usize,
    /// Error from an indexing pass that produced nothing to show
    pub load_error: Option<String>,
    /// Status message (shown in status bar)
    pub status_message: Option<String>,
}

impl App {
    pub fn new(title: impl Into<String>, show_front_matter: bool) -> Self {
        Self {
            title: title.into(),
            mode: Mode::Normal,
            entries: Vec::new(),
            filter: String::new(),
            selected_index: 0,
            body_scroll: 0,
            body_len: 0,
            show_front_matter,
            skipped_count: 0,
            load_error: None,
            status_message: None,
        }
    }

    /// Replace the list with the result of an indexing pass.
    ///
    /// The selection stays on the same key when it is still present.
    pub fn load_posts(&mut self, report: &IndexReport) {
        let previous = self.selected_key().map(str::to_string);

        self.entries = report
            .posts
            .iter()
            .map(|post| PostEntry {
                key: post.key.to_string(),
                title: post.front_matter.title().map(str::to_string),
            })
            .collect();
        self.skipped_count = report.skipped.len();
        self.load_error = None;

        let restored = previous.and_then(|key| {
            self.displayed_items()
                .iter()
                .position(|entry| entry.key == key)
        });
        match restored {
            Some(idx) => self.selected_index = idx,
            None => self.select_first(),
        }

        if self.skipped_count > 0 {
            self.set_status(format!(
                "{} file(s) skipped, run `blogview check` for details",
                self.skipped_count
            ));
        }
    }

    /// Record a failed indexing pass.
    ///
    /// Before anything was loaded the error takes over the body pane;
    /// afterwards the previous index stays on screen.
    pub fn index_failed(&mut self, error: impl Into<String>) {
        let error = error.into();
        if self.entries.is_empty() {
            self.load_error = Some(error);
        } else {
            self.set_status(format!("Re-index failed: {}", error));
        }
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some(msg.into());
    }

    /// Entries whose key contains the filter (case-insensitive)
    pub fn displayed_items(&self) -> Vec<&PostEntry> {
        if self.filter.is_empty() {
            return self.entries.iter().collect();
        }
        let needle = self.filter.to_lowercase();
        self.entries
            .iter()
            .filter(|entry| entry.key.to_lowercase().contains(&needle))
            .collect()
    }

    pub fn selected_key(&self) -> Option<&str> {
        self.displayed_items()
            .get(self.selected_index)
            .map(|entry| entry.key.as_str())
    }

    pub fn select_next(&mut self) {
        let len = self.displayed_items().len();
        if len > 0 {
            self.selected_index = (self.selected_index + 1) % len;
            self.body_scroll = 0;
        }
    }

    pub fn select_prev(&mut self) {
        let len = self.displayed_items().len();
        if len > 0 {
            self.selected_index = self
                .selected_index
                .checked_sub(1)
                .unwrap_or(len.saturating_sub(1));
            self.body_scroll = 0;
        }
    }

    pub fn select_first(&mut self) {
        self.selected_index = 0;
        self.body_scroll = 0;
    }

    pub fn select_last(&mut self) {
        self.selected_index = self.displayed_items().len().saturating_sub(1);
        self.body_scroll = 0;
    }

    pub fn scroll_body_down(&mut self, lines: usize) {
        let max = self.body_len.saturating_sub(1);
        self.body_scroll = (self.body_scroll + lines).min(max);
    }

    pub fn scroll_body_up(&mut self, lines: usize) {
        self.body_scroll = self.body_scroll.saturating_sub(lines);
    }

    pub fn toggle_front_matter(&mut self) {
        self.show_front_matter = !self.show_front_matter;
        self.body_scroll = 0;
    }

    pub fn enter_filter(&mut self) {
        self.mode = Mode::Filter;
    }

    /// Leave filter mode, keeping the filter text
    pub fn apply_filter(&mut self) {
        self.mode = Mode::Normal;
    }

    /// Leave filter mode and drop the filter
    pub fn cancel_filter(&mut self) {
        self.mode = Mode::Normal;
        self.filter.clear();
        self.select_first();
    }

    pub fn filter_insert(&mut self, c: char) {
        self.filter.push(c);
        self.select_first();
    }

    pub fn filter_backspace(&mut self) {
        self.filter.pop();
        self.select_first();
    }
}

/// Lines shown in the body pane for a post
pub fn post_lines(post: &Post<'_>, show_front_matter: bool) -> Vec<String> {
    let mut lines = Vec::new();

    if show_front_matter {
        lines.push("---".to_string());
        if !post.front_matter.is_empty() {
            match post.front_matter.to_yaml() {
                Ok(yaml) => lines.extend(yaml.lines().map(str::to_string)),
                Err(e) => lines.push(format!("# front matter could not be shown: {}", e)),
            }
        }
        lines.push("---".to_string());
    }

    lines.extend(post.body.lines().map(str::to_string));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use blogview_core::{index_directory, IndexOptions};
    use std::fs;
    use tempfile::TempDir;

    fn indexed(files: &[(&str, &str)]) -> (TempDir, IndexReport) {
        let tmp = TempDir::new().unwrap();
        for (name, content) in files {
            fs::write(tmp.path().join(name), content).unwrap();
        }
        let report = index_directory(tmp.path(), &IndexOptions::default()).unwrap();
        (tmp, report)
    }

    fn sample() -> (TempDir, IndexReport) {
        indexed(&[
            ("alpha.md", "---\ntitle: Alpha\n---\nfirst\nsecond\nthird\n"),
            ("beta.md", "---\ntitle: Beta\n---\nbeta body\n"),
            ("gamma-notes.md", "---\n---\ngamma\n"),
        ])
    }

    #[test]
    fn test_load_posts() {
        let (_tmp, report) = sample();
        let mut app = App::new("blog", false);
        app.load_posts(&report);

        assert_eq!(app.entries.len(), 3);
        assert_eq!(app.selected_key(), Some("alpha"));
        assert_eq!(app.entries[1].title.as_deref(), Some("Beta"));
        assert_eq!(app.entries[2].title, None);
        assert!(app.status_message.is_none());
    }

    #[test]
    fn test_selection_wraps() {
        let (_tmp, report) = sample();
        let mut app = App::new("blog", false);
        app.load_posts(&report);

        app.select_prev();
        assert_eq!(app.selected_key(), Some("gamma-notes"));
        app.select_next();
        assert_eq!(app.selected_key(), Some("alpha"));
        app.select_last();
        assert_eq!(app.selected_key(), Some("gamma-notes"));
        app.select_first();
        assert_eq!(app.selected_key(), Some("alpha"));
    }

    #[test]
    fn test_filter_is_case_insensitive_substring() {
        let (_tmp, report) = sample();
        let mut app = App::new("blog", false);
        app.load_posts(&report);

        app.enter_filter();
        for c in "NOTE".chars() {
            app.filter_insert(c);
        }
        assert_eq!(app.displayed_items().len(), 1);
        assert_eq!(app.selected_key(), Some("gamma-notes"));

        app.cancel_filter();
        assert_eq!(app.mode, Mode::Normal);
        assert_eq!(app.displayed_items().len(), 3);
    }

    #[test]
    fn test_reload_keeps_selected_key() {
        let (_tmp, report) = sample();
        let mut app = App::new("blog", false);
        app.load_posts(&report);
        app.select_next();
        assert_eq!(app.selected_key(), Some("beta"));

        let (_tmp2, smaller) = indexed(&[("beta.md", "---\ntitle: Beta\n---\nx\n")]);
        app.load_posts(&smaller);
        assert_eq!(app.selected_key(), Some("beta"));
        assert_eq!(app.selected_index, 0);
    }

    #[test]
    fn test_body_scroll_is_clamped() {
        let mut app = App::new("blog", false);
        app.body_len = 3;
        app.scroll_body_down(10);
        assert_eq!(app.body_scroll, 2);
        app.scroll_body_up(1);
        assert_eq!(app.body_scroll, 1);
        app.scroll_body_up(10);
        assert_eq!(app.body_scroll, 0);
    }

    #[test]
    fn test_index_failure_before_and_after_load() {
        let mut app = App::new("blog", false);
        app.index_failed("path not found: content/posts");
        assert_eq!(
            app.load_error.as_deref(),
            Some("path not found: content/posts")
        );

        let (_tmp, report) = sample();
        app.load_posts(&report);
        assert!(app.load_error.is_none());

        app.index_failed("boom");
        assert!(app.load_error.is_none());
        assert_eq!(app.entries.len(), 3);
        assert_eq!(app.status_message.as_deref(), Some("Re-index failed: boom"));
    }

    #[test]
    fn test_skipped_files_reported_in_status() {
        let (_tmp, report) = indexed(&[("ok.md", "---\n---\nok\n"), ("bad.md", "no front matter")]);
        let mut app = App::new("blog", false);
        app.load_posts(&report);
        assert_eq!(app.skipped_count, 1);
        assert!(app.status_message.as_deref().unwrap().starts_with("1 file(s) skipped"));
    }

    #[test]
    fn test_post_lines() {
        let (_tmp, report) = sample();
        let post = report.posts.get("alpha").unwrap();

        assert_eq!(post_lines(&post, false), vec!["first", "second", "third"]);
        assert_eq!(
            post_lines(&post, true),
            vec!["---", "title: Alpha", "---", "first", "second", "third"]
        );

        let bare = report.posts.get("gamma-notes").unwrap();
        assert_eq!(post_lines(&bare, true), vec!["---", "---", "gamma"]);
    }
}
