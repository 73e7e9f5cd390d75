use std::thread;

use image::{Rgba, RgbaImage};
use tao::{
    event::{Event, StartCause},
    event_loop::{ControlFlow, EventLoopBuilder},
    platform::windows::EventLoopBuilderExtWindows,
};
use tray_icon::{
    menu::{Menu, MenuEvent, MenuItem},
    Icon, TrayIcon, TrayIconBuilder,
};

use crate::{wallpaper, warn, DEBUG_NAME};

const ICON_EDGE: u32 = 64;

enum TrayUserEvent {
    Menu(MenuEvent),
}

/// Start the tray presence on its own thread. The thread is intentionally
/// never joined: it either outlives the scheduler until process exit, or it
/// terminates the whole process itself through the Exit action.
pub fn spawn() {
    let spawned = thread::Builder::new()
        .name("tray".to_string())
        .spawn(run_event_loop);
    if let Err(e) = spawned {
        warn!("[{}][TRAY] Failed to start tray thread: {e}; continuing without tray", DEBUG_NAME);
    }
}

fn run_event_loop() {
    let event_loop = EventLoopBuilder::<TrayUserEvent>::with_user_event()
        .with_any_thread(true)
        .build();

    let proxy = event_loop.create_proxy();
    MenuEvent::set_event_handler(Some(move |event| {
        let _ = proxy.send_event(TrayUserEvent::Menu(event));
    }));

    let menu = Menu::new();
    let exit_item = MenuItem::new("Exit", true, None);
    if let Err(e) = menu.append(&exit_item) {
        warn!("[{}][TRAY] Failed to build tray menu: {e}", DEBUG_NAME);
    }

    let mut tray_icon: Option<TrayIcon> = None;

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;

        match event {
            // The icon must be created on the thread that pumps this loop.
            Event::NewEvents(StartCause::Init) => {
                let mut builder = TrayIconBuilder::new()
                    .with_menu(Box::new(menu.clone()))
                    .with_tooltip("Deskdraw");
                if let Some(icon) = solid_icon() {
                    builder = builder.with_icon(icon);
                }
                match builder.build() {
                    Ok(icon) => tray_icon = Some(icon),
                    Err(e) => warn!("[{}][TRAY] Failed to create tray icon: {e}", DEBUG_NAME),
                }
            }
            Event::UserEvent(TrayUserEvent::Menu(menu_event)) => {
                if menu_event.id == exit_item.id() {
                    // Drop the icon first so it disappears before the process
                    // goes away; any in-flight render is abandoned.
                    tray_icon.take();
                    wallpaper::restore_original();
                    std::process::exit(0);
                }
            }
            _ => {}
        }
    });
}

/// Plain red square, matching the fixed tray art of the overlay.
fn solid_icon() -> Option<Icon> {
    let image = RgbaImage::from_pixel(ICON_EDGE, ICON_EDGE, Rgba([255, 0, 0, 255]));
    Icon::from_rgba(image.into_raw(), ICON_EDGE, ICON_EDGE).ok()
}
