#![windows_subsystem = "windows"]

mod bootstrap;
mod compositor;
mod data_loaders;
mod fonts;
mod logging;
mod paths;
mod scheduler;
mod themes;
mod tray;
mod utility;
mod wallpaper;

use windows::core::BOOL;
use windows::Win32::System::Console::SetConsoleCtrlHandler;

pub const APP_NAME: &str = "deskdraw";
pub const DEBUG_NAME: &str = "DESKDRAW";

fn main() -> Result<(), String> {
	logging::init(true, "info");

	std::panic::set_hook(Box::new(|panic_info| {
		error!("[{}] Panic: {}", DEBUG_NAME, panic_info);
	}));

	info!("!---------- [{}] Starting {} ----------!", DEBUG_NAME, APP_NAME);

	bootstrap::prepare_environment()?;
	install_interrupt_handler();
	tray::spawn();

	scheduler::run()
}

/// Console interrupts (Ctrl+C, console close) take the same graceful path as
/// the tray Exit action: put the original wallpaper back, then terminate.
fn install_interrupt_handler() {
	unsafe extern "system" fn handle_console_signal(_ctrl_type: u32) -> BOOL {
		wallpaper::restore_original();
		std::process::exit(0);
	}

	unsafe {
		if SetConsoleCtrlHandler(Some(handle_console_signal), true).is_err() {
			warn!("[{}] Failed to install console interrupt handler", DEBUG_NAME);
		}
	}
}
