//! State for the members table.
//!
//! The authoritative list is the only copy of member data: edits and deletes
//! land there, and the displayed rows are re-derived from it plus the search
//! text. A later search therefore never loses an edit or resurrects a
//! deleted row. Field edits do not re-run the filter, so a row being edited
//! stays on screen even when its new value no longer matches.

use std::any::Any;
use std::collections::HashSet;

use chrono::{DateTime, Utc};
use members_states::{State, state_assign_impl};

use crate::config::{BusinessConfig, DEFAULT_PAGE_SIZE, EditMode};
use crate::members::model::{Member, MemberField, MemberKey};

/// Which row, if any, renders its cells as text inputs.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
enum RowEditor {
    #[default]
    Viewing,

    /// `draft` is only used in [`EditMode::Buffered`].
    Editing {
        key: MemberKey,
        draft: Option<Member>,
    },
}

/// One slot of the pagination control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Page(usize),
    Ellipsis,
}

/// Pages shown around the current one before collapsing into an ellipsis.
const PAGE_WINDOW: usize = 2;

#[derive(Debug)]
pub struct MembersTableState {
    members: Vec<Member>,
    displayed: Vec<MemberKey>,
    search_text: String,
    editor: RowEditor,
    selected: HashSet<MemberKey>,
    edit_mode: EditMode,
    page_size: usize,
    /// 1-based.
    current_page: usize,
    jump_input: String,
    loading: bool,
    last_fetch: Option<DateTime<Utc>>,
}

impl Default for MembersTableState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE, EditMode::default())
    }
}

impl State for MembersTableState {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
        state_assign_impl(self, new_self);
    }
}

impl MembersTableState {
    pub fn new(page_size: usize, edit_mode: EditMode) -> Self {
        Self {
            members: Vec::new(),
            displayed: Vec::new(),
            search_text: String::new(),
            editor: RowEditor::Viewing,
            selected: HashSet::new(),
            edit_mode,
            page_size: page_size.max(1),
            current_page: 1,
            jump_input: String::new(),
            loading: false,
            last_fetch: None,
        }
    }

    pub fn from_config(config: &BusinessConfig) -> Self {
        Self::new(config.page_size, config.edit_mode)
    }

    // =====================
    // Loading
    // =====================

    pub fn begin_loading(&mut self) {
        self.loading = true;
    }

    /// Replaces all rows with a fresh fetch. Search text typed while the
    /// fetch was running is applied to the new rows.
    pub fn populate(&mut self, members: Vec<Member>, now: DateTime<Utc>) {
        let mut seen = HashSet::with_capacity(members.len());
        for member in &members {
            if !seen.insert(member.key) {
                log::warn!("duplicate member id {}; rows sharing it act as one", member.key);
            }
        }

        self.members = members;
        self.editor = RowEditor::Viewing;
        self.selected.clear();
        self.loading = false;
        self.last_fetch = Some(now);
        self.current_page = 1;
        self.refilter();
    }

    /// The fetch failed; leave an empty, idle table.
    pub fn finish_without_data(&mut self) {
        self.loading = false;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn last_fetch(&self) -> Option<DateTime<Utc>> {
        self.last_fetch
    }

    // =====================
    // Rows
    // =====================

    /// Every member still present, in fetch order.
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn member(&self, key: &MemberKey) -> Option<&Member> {
        self.members.iter().find(|m| m.key == *key)
    }

    pub fn displayed_keys(&self) -> &[MemberKey] {
        &self.displayed
    }

    pub fn displayed_len(&self) -> usize {
        self.displayed.len()
    }

    pub fn displayed_members(&self) -> Vec<&Member> {
        self.displayed
            .iter()
            .filter_map(|key| self.member(key))
            .collect()
    }

    pub fn edit_mode(&self) -> EditMode {
        self.edit_mode
    }

    // =====================
    // Search
    // =====================

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn search(&mut self, text: impl Into<String>) {
        self.search_text = text.into();
        self.current_page = 1;
        self.refilter();
        log::debug!(
            "search {:?} matched {} of {} members",
            self.search_text,
            self.displayed.len(),
            self.members.len()
        );
    }

    fn refilter(&mut self) {
        let needle = self.search_text.to_lowercase();
        self.displayed = self
            .members
            .iter()
            .filter(|m| m.matches(&needle))
            .map(|m| m.key)
            .collect();

        let displayed = &self.displayed;
        self.selected.retain(|key| displayed.contains(key));
        self.clamp_page();
    }

    // =====================
    // Row editor
    // =====================

    pub fn editing_key(&self) -> Option<MemberKey> {
        match &self.editor {
            RowEditor::Viewing => None,
            RowEditor::Editing { key, .. } => Some(*key),
        }
    }

    pub fn is_editing(&self, key: &MemberKey) -> bool {
        self.editing_key().as_ref() == Some(key)
    }

    /// Opens `key` for editing. Any other open row is closed, and its draft
    /// (buffered mode) is dropped.
    pub fn edit(&mut self, key: MemberKey) {
        if let RowEditor::Editing {
            key: previous,
            draft: Some(_),
        } = &self.editor
            && *previous != key
        {
            log::debug!("abandoning unsaved draft for {previous}");
        }

        let draft = match self.edit_mode {
            EditMode::Live => None,
            EditMode::Buffered => self.member(&key).cloned(),
        };
        self.editor = RowEditor::Editing { key, draft };
    }

    /// Live mode writes to the member immediately. Buffered mode writes to
    /// the open row's draft and ignores other keys.
    pub fn set_field(&mut self, key: MemberKey, field: MemberField, value: impl Into<String>) {
        match self.edit_mode {
            EditMode::Live => {
                if let Some(member) = self.members.iter_mut().find(|m| m.key == key) {
                    member.set_field(field, value.into());
                }
            }
            EditMode::Buffered => {
                if let RowEditor::Editing {
                    key: editing,
                    draft: Some(draft),
                } = &mut self.editor
                    && *editing == key
                {
                    draft.set_field(field, value.into());
                }
            }
        }
    }

    /// What an editing cell shows: the draft when there is one, else the member.
    pub fn cell_value<'a>(&'a self, member: &'a Member, field: MemberField) -> &'a str {
        match &self.editor {
            RowEditor::Editing {
                key,
                draft: Some(draft),
            } if *key == member.key => draft.field(field),
            _ => member.field(field),
        }
    }

    /// Closes edit mode, committing the draft in buffered mode.
    pub fn save(&mut self, key: MemberKey) {
        let editor = std::mem::take(&mut self.editor);
        if let RowEditor::Editing {
            key: editing,
            draft: Some(draft),
        } = editor
            && editing == key
            && let Some(member) = self.members.iter_mut().find(|m| m.key == key)
        {
            *member = draft;
        }
        log::debug!("saved edits for {key}");
    }

    /// Closes edit mode. Live edits stay; a buffered draft is discarded.
    pub fn cancel(&mut self, key: MemberKey) {
        self.editor = RowEditor::Viewing;
        log::debug!("cancelled edit for {key}");
    }

    // =====================
    // Selection
    // =====================

    pub fn select_rows(&mut self, keys: impl IntoIterator<Item = MemberKey>) {
        self.selected = keys.into_iter().collect();
    }

    pub fn toggle_row(&mut self, key: MemberKey, checked: bool) {
        if checked {
            self.selected.insert(key);
        } else {
            self.selected.remove(&key);
        }
    }

    /// Selects every displayed row across all pages, or clears the selection.
    pub fn select_all(&mut self, checked: bool) {
        if checked {
            self.selected = self.displayed.iter().copied().collect();
        } else {
            self.selected.clear();
        }
    }

    pub fn is_selected(&self, key: &MemberKey) -> bool {
        self.selected.contains(key)
    }

    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    /// Selected keys in fetch order.
    pub fn selected_keys(&self) -> Vec<MemberKey> {
        self.members
            .iter()
            .map(|m| m.key)
            .filter(|key| self.selected.contains(key))
            .collect()
    }

    /// State of the header checkbox.
    pub fn all_selected(&self) -> bool {
        !self.displayed.is_empty() && self.displayed.iter().all(|k| self.selected.contains(k))
    }

    // =====================
    // Deletion
    // =====================

    /// Removes every displayed row that is selected. Clears the selection and
    /// closes edit mode.
    pub fn delete_selected(&mut self) {
        let selected = std::mem::take(&mut self.selected);
        let doomed: HashSet<MemberKey> = self
            .displayed
            .iter()
            .filter(|key| selected.contains(key))
            .copied()
            .collect();

        self.members.retain(|m| !doomed.contains(&m.key));
        self.displayed.retain(|key| !doomed.contains(key));
        self.editor = RowEditor::Viewing;
        self.clamp_page();
        log::debug!("deleted {} selected members", doomed.len());
    }

    /// Removes one row. Edit mode closes even when another row was open.
    pub fn delete_one(&mut self, key: MemberKey) {
        self.members.retain(|m| m.key != key);
        self.displayed.retain(|k| *k != key);
        self.selected.remove(&key);
        self.editor = RowEditor::Viewing;
        self.clamp_page();
        log::debug!("deleted member {key}");
    }

    // =====================
    // Pagination
    // =====================

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_count(&self) -> usize {
        self.displayed.len().div_ceil(self.page_size).max(1)
    }

    pub fn set_page(&mut self, page: usize) {
        self.current_page = page.clamp(1, self.page_count());
    }

    pub fn next_page(&mut self) {
        self.set_page(self.current_page + 1);
    }

    pub fn prev_page(&mut self) {
        self.set_page(self.current_page.saturating_sub(1));
    }

    fn clamp_page(&mut self) {
        self.set_page(self.current_page);
    }

    /// Rows of the current page, in display order.
    pub fn page_members(&self) -> Vec<&Member> {
        let start = (self.current_page - 1) * self.page_size;
        self.displayed
            .iter()
            .skip(start)
            .take(self.page_size)
            .filter_map(|key| self.member(key))
            .collect()
    }

    pub fn page_items(&self) -> Vec<PageItem> {
        page_items(self.current_page, self.page_count())
    }

    pub fn jump_input(&self) -> &str {
        &self.jump_input
    }

    pub fn jump_input_mut(&mut self) -> &mut String {
        &mut self.jump_input
    }

    /// Jumps to the page typed into the quick-jump box. Unparseable input is
    /// cleared without moving; out-of-range pages are clamped.
    pub fn commit_quick_jump(&mut self) -> bool {
        let parsed = self.jump_input.trim().parse::<usize>();
        self.jump_input.clear();
        match parsed {
            Ok(page) => {
                self.set_page(page);
                true
            }
            Err(_) => false,
        }
    }
}

/// Page buttons for `current` of `count`: first and last always, a window
/// around the current page, ellipses for the gaps.
pub fn page_items(current: usize, count: usize) -> Vec<PageItem> {
    if count <= 2 * PAGE_WINDOW + 3 {
        return (1..=count).map(PageItem::Page).collect();
    }

    let start = current.saturating_sub(PAGE_WINDOW).max(2);
    let end = (current + PAGE_WINDOW).min(count - 1);

    let mut items = vec![PageItem::Page(1)];
    if start > 2 {
        items.push(PageItem::Ellipsis);
    }
    items.extend((start..=end).map(PageItem::Page));
    if end < count - 1 {
        items.push(PageItem::Ellipsis);
    }
    items.push(PageItem::Page(count));
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use ustr::Ustr;

    fn key(k: &str) -> MemberKey {
        Ustr::from(k)
    }

    fn ann_and_bo() -> Vec<Member> {
        vec![
            Member::new("1", "Ann", "a@x.com", "Admin"),
            Member::new("2", "Bo", "b@x.com", "User"),
        ]
    }

    fn table_with(members: Vec<Member>, mode: EditMode) -> MembersTableState {
        let mut table = MembersTableState::new(10, mode);
        table.begin_loading();
        table.populate(members, Utc::now());
        table
    }

    fn numbered(count: usize) -> Vec<Member> {
        (1..=count)
            .map(|i| {
                let role = if i % 5 == 0 { "admin" } else { "member" };
                Member::new(i.to_string(), format!("User {i}"), format!("u{i}@x.com"), role)
            })
            .collect()
    }

    fn displayed_names(table: &MembersTableState) -> Vec<String> {
        table
            .displayed_members()
            .iter()
            .map(|m| m.name.clone())
            .collect()
    }

    #[test]
    fn populate_fills_rows_and_clears_loading() {
        let table = table_with(ann_and_bo(), EditMode::Live);
        assert!(!table.is_loading());
        assert_eq!(table.displayed_len(), 2);
        assert!(table.last_fetch().is_some());
    }

    #[test]
    fn search_admin_keeps_only_ann() {
        let mut table = table_with(ann_and_bo(), EditMode::Live);
        table.search("admin");
        assert_eq!(table.displayed_keys(), &[key("1")]);
    }

    #[test]
    fn search_matches_each_field_case_insensitively() {
        let members = numbered(23);
        let mut table = table_with(members.clone(), EditMode::Live);

        for needle in ["ADMIN", "user 1", "U2@X", "zzz", "@x.com"] {
            table.search(needle);
            let lowered = needle.to_lowercase();
            let expected: Vec<MemberKey> = members
                .iter()
                .filter(|m| {
                    m.name.to_lowercase().contains(&lowered)
                        || m.email.to_lowercase().contains(&lowered)
                        || m.role.to_lowercase().contains(&lowered)
                })
                .map(|m| m.key)
                .collect();
            assert_eq!(table.displayed_keys(), expected.as_slice(), "needle {needle}");
        }

        table.search("");
        assert_eq!(table.displayed_len(), 23);
    }

    #[test]
    fn search_typed_during_load_applies_to_fetched_rows() {
        let mut table = MembersTableState::default();
        table.begin_loading();
        table.search("bo");
        table.populate(ann_and_bo(), Utc::now());
        assert_eq!(displayed_names(&table), vec!["Bo"]);
    }

    #[test]
    fn select_all_then_unselect_all_is_empty() {
        let mut table = table_with(ann_and_bo(), EditMode::Live);
        table.select_rows([key("2")]);
        table.select_all(true);
        assert_eq!(table.selected_count(), 2);
        assert!(table.all_selected());

        table.select_all(false);
        assert_eq!(table.selected_count(), 0);
        assert!(!table.all_selected());
    }

    #[test]
    fn select_all_spans_every_page() {
        let mut table = table_with(numbered(23), EditMode::Live);
        table.select_all(true);
        assert_eq!(table.selected_count(), 23);
    }

    #[test]
    fn all_selected_is_false_for_empty_table() {
        let mut table = table_with(Vec::new(), EditMode::Live);
        table.select_all(true);
        assert!(!table.all_selected());
    }

    #[test]
    fn select_rows_replaces_selection() {
        let mut table = table_with(ann_and_bo(), EditMode::Live);
        table.select_rows([key("1")]);
        table.select_rows([key("2")]);
        assert_eq!(table.selected_keys(), vec![key("2")]);
    }

    #[test]
    fn toggle_row_adds_and_removes() {
        let mut table = table_with(ann_and_bo(), EditMode::Live);
        table.toggle_row(key("1"), true);
        assert!(table.is_selected(&key("1")));
        table.toggle_row(key("1"), false);
        assert!(!table.is_selected(&key("1")));
    }

    #[test]
    fn delete_one_removes_exactly_one_and_closes_editor() {
        let mut table = table_with(ann_and_bo(), EditMode::Live);
        table.select_rows([key("1"), key("2")]);
        table.edit(key("2"));

        table.delete_one(key("1"));

        assert_eq!(table.displayed_keys(), &[key("2")]);
        assert_eq!(table.members().len(), 1);
        assert_eq!(table.selected_keys(), vec![key("2")]);
        assert_eq!(table.editing_key(), None);
    }

    #[test]
    fn delete_selected_keeps_relative_order() {
        let mut table = table_with(numbered(5), EditMode::Live);
        table.select_rows([key("2"), key("4")]);
        table.edit(key("1"));

        table.delete_selected();

        let keys: Vec<&str> = table.displayed_keys().iter().map(Ustr::as_str).collect();
        assert_eq!(keys, vec!["1", "3", "5"]);
        assert_eq!(table.selected_count(), 0);
        assert_eq!(table.editing_key(), None);
    }

    #[test]
    fn delete_selected_with_nothing_selected_only_closes_editor() {
        let mut table = table_with(ann_and_bo(), EditMode::Live);
        table.edit(key("2"));

        table.delete_selected();

        assert_eq!(table.displayed_len(), 2);
        assert_eq!(table.editing_key(), None);
    }

    #[test]
    fn duplicate_ids_still_load() {
        let mut table = table_with(Vec::new(), EditMode::Live);
        table.populate(
            vec![
                Member::new("1", "Ann", "a@x.com", "Admin"),
                Member::new("1", "Annex", "ax@x.com", "User"),
            ],
            Utc::now(),
        );

        assert_eq!(table.members().len(), 2);
        assert!(!table.is_loading());
    }

    #[test]
    fn live_save_keeps_typed_value() {
        let mut table = table_with(ann_and_bo(), EditMode::Live);
        table.edit(key("1"));
        table.set_field(key("1"), MemberField::Name, "Annie");
        table.save(key("1"));

        assert_eq!(table.editing_key(), None);
        assert_eq!(table.member(&key("1")).map(|m| m.name.as_str()), Some("Annie"));
    }

    #[test]
    fn live_cancel_does_not_roll_back() {
        let mut table = table_with(ann_and_bo(), EditMode::Live);
        table.edit(key("1"));
        table.set_field(key("1"), MemberField::Name, "Annie");
        table.cancel(key("1"));

        assert_eq!(table.editing_key(), None);
        assert_eq!(table.member(&key("1")).map(|m| m.name.as_str()), Some("Annie"));
    }

    #[test]
    fn buffered_cancel_discards_draft() {
        let mut table = table_with(ann_and_bo(), EditMode::Buffered);
        table.edit(key("1"));
        table.set_field(key("1"), MemberField::Name, "Annie");

        let ann = table.member(&key("1")).cloned().expect("ann exists");
        assert_eq!(ann.name, "Ann");
        assert_eq!(table.cell_value(&ann, MemberField::Name), "Annie");

        table.cancel(key("1"));
        assert_eq!(table.editing_key(), None);
        assert_eq!(table.member(&key("1")).map(|m| m.name.as_str()), Some("Ann"));
    }

    #[test]
    fn buffered_save_commits_draft() {
        let mut table = table_with(ann_and_bo(), EditMode::Buffered);
        table.edit(key("1"));
        table.set_field(key("1"), MemberField::Role, "Owner");
        table.save(key("1"));

        assert_eq!(table.member(&key("1")).map(|m| m.role.as_str()), Some("Owner"));
    }

    #[test]
    fn buffered_edit_of_other_row_abandons_draft() {
        let mut table = table_with(ann_and_bo(), EditMode::Buffered);
        table.edit(key("1"));
        table.set_field(key("1"), MemberField::Name, "Annie");
        table.edit(key("2"));
        table.save(key("2"));

        assert_eq!(table.member(&key("1")).map(|m| m.name.as_str()), Some("Ann"));
    }

    #[test]
    fn buffered_set_field_ignores_rows_not_being_edited() {
        let mut table = table_with(ann_and_bo(), EditMode::Buffered);
        table.edit(key("1"));
        table.set_field(key("2"), MemberField::Name, "Bobby");
        table.save(key("1"));

        assert_eq!(table.member(&key("2")).map(|m| m.name.as_str()), Some("Bo"));
    }

    #[test]
    fn edit_switches_rows_unconditionally() {
        let mut table = table_with(ann_and_bo(), EditMode::Live);
        table.edit(key("1"));
        table.edit(key("2"));
        assert!(table.is_editing(&key("2")));
        assert!(!table.is_editing(&key("1")));
    }

    #[test]
    fn edits_survive_a_later_search() {
        let mut table = table_with(ann_and_bo(), EditMode::Live);
        table.edit(key("1"));
        table.set_field(key("1"), MemberField::Name, "Annie");
        table.save(key("1"));

        table.search("x.com");
        assert_eq!(displayed_names(&table), vec!["Annie", "Bo"]);
    }

    #[test]
    fn deletes_survive_a_later_search() {
        let mut table = table_with(ann_and_bo(), EditMode::Live);
        table.delete_one(key("2"));
        table.search("");
        assert_eq!(displayed_names(&table), vec!["Ann"]);
    }

    #[test]
    fn editing_row_stays_visible_when_it_stops_matching() {
        let mut table = table_with(ann_and_bo(), EditMode::Live);
        table.search("ann");
        table.edit(key("1"));
        table.set_field(key("1"), MemberField::Name, "Zed");
        assert_eq!(table.displayed_keys(), &[key("1")]);
    }

    #[test]
    fn search_prunes_selection_to_displayed_rows() {
        let mut table = table_with(ann_and_bo(), EditMode::Live);
        table.select_all(true);
        table.search("bo");
        assert_eq!(table.selected_keys(), vec![key("2")]);
    }

    #[test]
    fn pagination_splits_rows_by_page_size() {
        let mut table = table_with(numbered(23), EditMode::Live);
        assert_eq!(table.page_count(), 3);
        assert_eq!(table.page_members().len(), 10);

        table.set_page(3);
        assert_eq!(table.page_members().len(), 3);
        assert_eq!(table.page_members()[0].name, "User 21");

        table.next_page();
        assert_eq!(table.current_page(), 3);
        table.set_page(0);
        assert_eq!(table.current_page(), 1);
        table.prev_page();
        assert_eq!(table.current_page(), 1);
    }

    #[test]
    fn empty_table_has_one_page() {
        let table = table_with(Vec::new(), EditMode::Live);
        assert_eq!(table.page_count(), 1);
        assert!(table.page_members().is_empty());
    }

    #[test]
    fn deleting_last_row_of_last_page_moves_back() {
        let mut table = table_with(numbered(11), EditMode::Live);
        table.set_page(2);
        table.delete_one(key("11"));
        assert_eq!(table.current_page(), 1);
    }

    #[test]
    fn search_resets_to_first_page() {
        let mut table = table_with(numbered(23), EditMode::Live);
        table.set_page(2);
        table.search("user");
        assert_eq!(table.current_page(), 1);
    }

    #[test]
    fn quick_jump_parses_and_clamps() {
        let mut table = table_with(numbered(23), EditMode::Live);

        table.jump_input_mut().push_str(" 2 ");
        assert!(table.commit_quick_jump());
        assert_eq!(table.current_page(), 2);

        table.jump_input_mut().push_str("99");
        assert!(table.commit_quick_jump());
        assert_eq!(table.current_page(), 3);

        table.jump_input_mut().push_str("two");
        assert!(!table.commit_quick_jump());
        assert_eq!(table.current_page(), 3);
        assert_eq!(table.jump_input(), "");
    }

    #[test]
    fn page_items_collapse_long_ranges() {
        use PageItem::{Ellipsis, Page};

        assert_eq!(page_items(1, 3), vec![Page(1), Page(2), Page(3)]);
        assert_eq!(
            page_items(1, 10),
            vec![Page(1), Page(2), Page(3), Ellipsis, Page(10)]
        );
        assert_eq!(
            page_items(5, 10),
            vec![
                Page(1),
                Ellipsis,
                Page(3),
                Page(4),
                Page(5),
                Page(6),
                Page(7),
                Ellipsis,
                Page(10)
            ]
        );
        assert_eq!(
            page_items(10, 10),
            vec![Page(1), Ellipsis, Page(8), Page(9), Page(10)]
        );
    }
}
