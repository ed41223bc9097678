//! Context-menu construction.
//!
//! The menu for a right-click is composed from capability sections derived
//! from the click context (link, editable field, text selection, image),
//! followed by the navigation section and Inspect Element. Each section is
//! built independently; empty sections vanish and separators only appear
//! between populated ones.

use serde::{Deserialize, Serialize};

/// Capability flags for the point where the user right-clicked.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClickContext {
    pub x: i32,
    pub y: i32,
    pub link_url: Option<String>,
    pub selection_text: Option<String>,
    pub image_url: Option<String>,
    pub is_editable: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MenuAction {
    OpenLinkInNewTab(String),
    CopyLinkAddress(String),
    Cut,
    Copy,
    Paste,
    SelectAll,
    CopySelection(String),
    OpenImageInNewTab(String),
    CopyImageAddress(String),
    Back,
    Forward,
    Reload,
    InspectElement { x: i32, y: i32 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub label: String,
    pub action: MenuAction,
    pub enabled: bool,
}

impl MenuItem {
    fn new(label: &str, action: MenuAction) -> Self {
        Self {
            label: label.to_string(),
            action,
            enabled: true,
        }
    }

    fn disabled_unless(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MenuEntry {
    Item(MenuItem),
    Separator,
}

/// Build the menu for a click context plus the active view's navigation
/// capabilities.
pub fn build_context_menu(
    ctx: &ClickContext,
    can_go_back: bool,
    can_go_forward: bool,
) -> Vec<MenuEntry> {
    let sections: Vec<Vec<MenuItem>> = vec![
        link_section(ctx),
        edit_section(ctx),
        selection_section(ctx),
        image_section(ctx),
        navigation_section(can_go_back, can_go_forward),
        vec![MenuItem::new(
            "Inspect Element",
            MenuAction::InspectElement { x: ctx.x, y: ctx.y },
        )],
    ];

    let mut menu = Vec::new();
    for section in sections.into_iter().filter(|s| !s.is_empty()) {
        if !menu.is_empty() {
            menu.push(MenuEntry::Separator);
        }
        menu.extend(section.into_iter().map(MenuEntry::Item));
    }
    menu
}

fn link_section(ctx: &ClickContext) -> Vec<MenuItem> {
    let Some(url) = &ctx.link_url else {
        return Vec::new();
    };
    vec![
        MenuItem::new(
            "Open Link in New Tab",
            MenuAction::OpenLinkInNewTab(url.clone()),
        ),
        MenuItem::new("Copy Link Address", MenuAction::CopyLinkAddress(url.clone())),
    ]
}

fn edit_section(ctx: &ClickContext) -> Vec<MenuItem> {
    if !ctx.is_editable {
        return Vec::new();
    }
    let has_selection = ctx.selection_text.is_some();
    vec![
        MenuItem::new("Cut", MenuAction::Cut).disabled_unless(has_selection),
        MenuItem::new("Copy", MenuAction::Copy).disabled_unless(has_selection),
        MenuItem::new("Paste", MenuAction::Paste),
        MenuItem::new("Select All", MenuAction::SelectAll),
    ]
}

fn selection_section(ctx: &ClickContext) -> Vec<MenuItem> {
    // Editable fields already offer Copy in the edit section.
    if ctx.is_editable {
        return Vec::new();
    }
    let Some(text) = &ctx.selection_text else {
        return Vec::new();
    };
    vec![MenuItem::new(
        "Copy",
        MenuAction::CopySelection(text.clone()),
    )]
}

fn image_section(ctx: &ClickContext) -> Vec<MenuItem> {
    let Some(url) = &ctx.image_url else {
        return Vec::new();
    };
    vec![
        MenuItem::new(
            "Open Image in New Tab",
            MenuAction::OpenImageInNewTab(url.clone()),
        ),
        MenuItem::new(
            "Copy Image Address",
            MenuAction::CopyImageAddress(url.clone()),
        ),
    ]
}

fn navigation_section(can_go_back: bool, can_go_forward: bool) -> Vec<MenuItem> {
    vec![
        MenuItem::new("Back", MenuAction::Back).disabled_unless(can_go_back),
        MenuItem::new("Forward", MenuAction::Forward).disabled_unless(can_go_forward),
        MenuItem::new("Reload", MenuAction::Reload),
    ]
}
