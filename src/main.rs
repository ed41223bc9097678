//! Probe Browser — a minimal desktop browsing shell.
//!
//! Entry point: runs the wry/tao shell when built with the `gui` feature.
//! Without it, runs a console walkthrough of the orchestrator core.

#[cfg(feature = "gui")]
fn main() {
    env_logger::init();
    probe_browser::ui::shell::run();
}

#[cfg(not(feature = "gui"))]
fn main() {
    env_logger::init();

    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║             Probe Browser v{} — Demo Mode                ║", env!("CARGO_PKG_VERSION"));
    println!("║        Tab/view orchestrator console walkthrough           ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();

    demo_database();
    demo_tabs();
    demo_layout();
    demo_downloads();
    demo_shortcuts();
    demo_context_menu();

    println!();
    println!("═══════════════════════════════════════════════════════════════");
    println!("  ✅ Orchestrator core demonstrated successfully!");
    println!("  Build with --features gui for the full browser shell.");
    println!("═══════════════════════════════════════════════════════════════");
}

#[cfg(not(feature = "gui"))]
fn section(name: &str) {
    println!("───────────────────────────────────────────────────────────────");
    println!("  📦 {}", name);
    println!("───────────────────────────────────────────────────────────────");
}

#[cfg(not(feature = "gui"))]
mod demo_host {
    //! Minimal in-process stand-ins for the content engine and UI channel,
    //! enough to drive the orchestrator from a console.

    use std::path::PathBuf;

    use probe_browser::engine::{
        ContentView, FindOptions, StopFindAction, ViewFactory, WindowHost,
    };
    use probe_browser::types::errors::ViewError;
    use probe_browser::types::geometry::Rect;
    use probe_browser::types::tab::TabId;
    use probe_browser::ui::channel::{SaveLocationPrompt, UiEvent, UiSink};

    pub struct DemoView {
        url: String,
        zoom: f64,
    }

    impl ContentView for DemoView {
        fn load_url(&mut self, url: &str) -> Result<(), ViewError> {
            self.url = url.to_string();
            Ok(())
        }
        fn url(&self) -> String {
            self.url.clone()
        }
        fn title(&self) -> String {
            String::new()
        }
        fn go_back(&mut self) {}
        fn can_go_back(&self) -> bool {
            false
        }
        fn go_forward(&mut self) {}
        fn can_go_forward(&self) -> bool {
            false
        }
        fn reload(&mut self) {}
        fn reload_ignoring_cache(&mut self) {}
        fn set_zoom_level(&mut self, level: f64) {
            self.zoom = level;
        }
        fn zoom_level(&self) -> f64 {
            self.zoom
        }
        fn find_in_page(&mut self, _text: &str, _options: FindOptions) {}
        fn stop_find_in_page(&mut self, _action: StopFindAction) {}
        fn cut(&mut self) {}
        fn copy(&mut self) {}
        fn paste(&mut self) {}
        fn select_all(&mut self) {}
        fn print_page(&mut self) {}
        fn inspect_element(&mut self, _x: i32, _y: i32) {}
        fn toggle_devtools(&mut self) {}
        fn set_audio_muted(&mut self, _muted: bool) {}
        fn set_visible(&mut self, _visible: bool) {}
        fn set_bounds(&mut self, _bounds: Rect) -> Result<(), ViewError> {
            Ok(())
        }
    }

    pub struct DemoFactory;

    impl ViewFactory for DemoFactory {
        fn create_view(&mut self, _id: TabId) -> Option<Box<dyn ContentView>> {
            Some(Box::new(DemoView {
                url: String::new(),
                zoom: 0.0,
            }))
        }
    }

    pub struct DemoWindow;

    impl WindowHost for DemoWindow {
        fn inner_bounds(&self) -> Option<Rect> {
            Some(Rect::of_size(1280, 800))
        }
    }

    pub struct PrintSink;

    impl UiSink for PrintSink {
        fn publish(&mut self, event: UiEvent) {
            println!("    ui <- {}", serde_json::to_string(&event).unwrap_or_default());
        }
    }

    pub struct AcceptAllPrompt;

    impl SaveLocationPrompt for AcceptAllPrompt {
        fn choose_save_path(&mut self, file_name: &str) -> Option<PathBuf> {
            Some(PathBuf::from("/tmp").join(file_name))
        }
    }
}

#[cfg(not(feature = "gui"))]
fn demo_app() -> probe_browser::app::App {
    use crate::demo_host::*;
    use probe_browser::app::App;
    use probe_browser::managers::persistence::PersistenceGateway;

    App::new(
        PersistenceGateway::in_memory(),
        Box::new(DemoWindow),
        Box::new(DemoFactory),
        Box::new(PrintSink),
        Box::new(AcceptAllPrompt),
    )
}

#[cfg(not(feature = "gui"))]
fn demo_database() {
    use probe_browser::database::connection::Database;
    section("Database Layer");

    let db = Database::open_in_memory().expect("Failed to open database");
    let tables: Vec<String> = {
        let conn = db.connection();
        let mut stmt = conn
            .prepare("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")
            .unwrap();
        stmt.query_map([], |row| row.get(0))
            .unwrap()
            .filter_map(|r| r.ok())
            .collect()
    };
    println!("  Created {} tables: {}", tables.len(), tables.join(", "));
    println!("  ✓ Database + migrations OK");
    println!();
}

#[cfg(not(feature = "gui"))]
fn demo_tabs() {
    section("Tab Registry + View Switcher");

    let mut app = demo_app();
    let first = app.create_tab(Some("https://example.com"));
    let second = app.create_tab(Some("https://github.com"));
    println!("  Created tabs {} and {}, active = {:?}", first, second, app.active_tab());

    app.close_tab(second);
    println!("  Closed tab {}, active fell back to {:?}", second, app.active_tab());

    app.close_tab(first);
    println!(
        "  Closed the last tab; registry auto-created a fresh one ({} tabs live)",
        app.list_tabs().len()
    );
    println!("  ✓ TabManager OK");
    println!();
}

#[cfg(not(feature = "gui"))]
fn demo_layout() {
    use probe_browser::managers::layout_manager::{LayoutManager, CHROME_HEIGHT};
    use probe_browser::types::geometry::Rect;
    section("Bounds Layout");

    let layout = LayoutManager::new();
    let rect = layout.content_rect(Rect::of_size(1280, 800));
    println!(
        "  1280x800 window -> content {}x{} below {} px of chrome",
        rect.width, rect.height, CHROME_HEIGHT
    );
    println!("  ✓ LayoutManager OK");
    println!();
}

#[cfg(not(feature = "gui"))]
fn demo_downloads() {
    use probe_browser::engine::{DownloadDoneState, DownloadSignal};
    section("Download Coordinator");

    let mut app = demo_app();
    app.handle_download_signal(DownloadSignal::Started {
        file_name: "demo.iso".to_string(),
        total_bytes: 1000,
    });
    app.handle_download_signal(DownloadSignal::Progress {
        file_name: "demo.iso".to_string(),
        received_bytes: 400,
    });
    app.handle_download_signal(DownloadSignal::Done {
        file_name: "demo.iso".to_string(),
        state: DownloadDoneState::Completed,
    });
    println!("  Tracked {} download(s)", app.downloads.list().len());
    println!("  ✓ DownloadManager OK");
    println!();
}

#[cfg(not(feature = "gui"))]
fn demo_shortcuts() {
    use probe_browser::managers::shortcut_manager::{KeyChord, ShortcutManager};
    section("Shortcut Dispatch");

    let mgr = ShortcutManager::new();
    for chord in [KeyChord::primary("t"), KeyChord::primary("9"), KeyChord::bare("F12")] {
        println!("  {:?} -> {:?}", chord, mgr.resolve(&chord));
    }
    println!("  ✓ ShortcutManager OK");
    println!();
}

#[cfg(not(feature = "gui"))]
fn demo_context_menu() {
    use probe_browser::managers::context_menu::{build_context_menu, ClickContext};
    section("Context Menu Builder");

    let ctx = ClickContext {
        link_url: Some("https://example.com/docs".to_string()),
        selection_text: Some("docs".to_string()),
        ..Default::default()
    };
    let menu = build_context_menu(&ctx, true, false);
    println!("  Link + selection click produced {} entries", menu.len());
    println!("  ✓ ContextMenuBuilder OK");
    println!();
}
