use anyhow::Result;
use invaders_8080::{DipConfig, InvadersApp, Machine};
use invaders_common::app::App;
use invaders_sdl2::SdlInitInfo;

/// Run the emulator with the given ROM image and DIP configuration until
/// the window closes.
pub fn run(rom: &[u8], dip: DipConfig) -> Result<()> {
    let mut app = InvadersApp::new(Machine::with_dip_config(dip));
    app.machine.load_rom(rom);

    let init_info = SdlInitInfo::builder()
        .width(app.width())
        .height(app.height())
        .scale(app.scale())
        .title(app.title())
        .build();
    invaders_sdl2::run(init_info, app)
}
