use probe_browser::managers::context_menu::{
    build_context_menu, ClickContext, MenuAction, MenuEntry,
};

fn items(menu: &[MenuEntry]) -> Vec<&MenuAction> {
    menu.iter()
        .filter_map(|e| match e {
            MenuEntry::Item(item) => Some(&item.action),
            MenuEntry::Separator => None,
        })
        .collect()
}

#[test]
fn test_plain_page_gets_navigation_and_inspect() {
    let menu = build_context_menu(&ClickContext::default(), true, false);
    let actions = items(&menu);
    assert!(actions.contains(&&MenuAction::Back));
    assert!(actions.contains(&&MenuAction::Forward));
    assert!(actions.contains(&&MenuAction::Reload));
    assert!(matches!(actions.last(), Some(MenuAction::InspectElement { .. })));
    // No link/edit/image items without the capabilities.
    assert!(!actions.iter().any(|a| matches!(a, MenuAction::OpenLinkInNewTab(_))));
    assert!(!actions.iter().any(|a| matches!(a, MenuAction::Paste)));
}

#[test]
fn test_navigation_items_reflect_capabilities() {
    let menu = build_context_menu(&ClickContext::default(), false, true);
    let back = menu.iter().find_map(|e| match e {
        MenuEntry::Item(item) if item.action == MenuAction::Back => Some(item),
        _ => None,
    });
    let forward = menu.iter().find_map(|e| match e {
        MenuEntry::Item(item) if item.action == MenuAction::Forward => Some(item),
        _ => None,
    });
    assert!(!back.unwrap().enabled);
    assert!(forward.unwrap().enabled);
}

#[test]
fn test_link_click_adds_link_section_first() {
    let ctx = ClickContext {
        link_url: Some("https://example.com/a".to_string()),
        ..Default::default()
    };
    let menu = build_context_menu(&ctx, true, true);
    match &menu[0] {
        MenuEntry::Item(item) => assert_eq!(
            item.action,
            MenuAction::OpenLinkInNewTab("https://example.com/a".to_string())
        ),
        MenuEntry::Separator => panic!("menu must not start with a separator"),
    }
    assert!(items(&menu)
        .iter()
        .any(|a| matches!(a, MenuAction::CopyLinkAddress(_))));
}

#[test]
fn test_editable_click_adds_edit_section() {
    let ctx = ClickContext {
        is_editable: true,
        selection_text: Some("word".to_string()),
        ..Default::default()
    };
    let menu = build_context_menu(&ctx, false, false);
    let actions = items(&menu);
    assert!(actions.contains(&&MenuAction::Cut));
    assert!(actions.contains(&&MenuAction::Copy));
    assert!(actions.contains(&&MenuAction::Paste));
    assert!(actions.contains(&&MenuAction::SelectAll));
    // The plain-selection copy is not duplicated for editable targets.
    assert!(!actions.iter().any(|a| matches!(a, MenuAction::CopySelection(_))));
}

#[test]
fn test_edit_items_disabled_without_selection() {
    let ctx = ClickContext {
        is_editable: true,
        ..Default::default()
    };
    let menu = build_context_menu(&ctx, false, false);
    for entry in &menu {
        if let MenuEntry::Item(item) = entry {
            match item.action {
                MenuAction::Cut | MenuAction::Copy => assert!(!item.enabled),
                MenuAction::Paste | MenuAction::SelectAll => assert!(item.enabled),
                _ => {}
            }
        }
    }
}

#[test]
fn test_selection_click_adds_copy() {
    let ctx = ClickContext {
        selection_text: Some("quoted text".to_string()),
        ..Default::default()
    };
    let menu = build_context_menu(&ctx, false, false);
    assert!(items(&menu)
        .iter()
        .any(|a| matches!(a, MenuAction::CopySelection(t) if t == "quoted text")));
}

#[test]
fn test_image_click_adds_image_section() {
    let ctx = ClickContext {
        image_url: Some("https://example.com/cat.png".to_string()),
        ..Default::default()
    };
    let menu = build_context_menu(&ctx, false, false);
    let actions = items(&menu);
    assert!(actions.iter().any(|a| matches!(a, MenuAction::OpenImageInNewTab(_))));
    assert!(actions.iter().any(|a| matches!(a, MenuAction::CopyImageAddress(_))));
}

#[test]
fn test_sections_are_separated() {
    let ctx = ClickContext {
        link_url: Some("https://example.com".to_string()),
        image_url: Some("https://example.com/cat.png".to_string()),
        ..Default::default()
    };
    let menu = build_context_menu(&ctx, true, true);
    // link | image | navigation | inspect -> three separators.
    let separators = menu.iter().filter(|e| matches!(e, MenuEntry::Separator)).count();
    assert_eq!(separators, 3);
}

#[test]
fn test_inspect_element_carries_click_position() {
    let ctx = ClickContext {
        x: 42,
        y: 7,
        ..Default::default()
    };
    let menu = build_context_menu(&ctx, false, false);
    assert!(items(&menu)
        .iter()
        .any(|a| matches!(a, MenuAction::InspectElement { x: 42, y: 7 })));
}
