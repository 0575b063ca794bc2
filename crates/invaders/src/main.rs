use invaders_8080::DipConfig;

const USAGE: &str = "usage: invaders <rom-path> [--ships N] [--hide-coin-info]

  <rom-path>         combined Space Invaders ROM image, loaded at 0x0000
  --ships N          ships per credit, 3 to 6 (default 3)
  --hide-coin-info   hide the coin info line in attract mode

keys: C coin, 1/2 start, A/D or arrows move, S/space shoot, P pause, T tilt";

fn main() {
    env_logger::init();

    let mut rom_path = None;
    let mut dip = DipConfig::default();

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--ships" => {
                let value = args.next().and_then(|v| v.parse::<u8>().ok());
                match value {
                    Some(n @ 3..=6) => dip.ships_per_credit = n,
                    _ => {
                        eprintln!("--ships takes a number from 3 to 6");
                        std::process::exit(1);
                    }
                }
            }
            "--hide-coin-info" => dip.show_coin_info = false,
            "--help" | "-h" => {
                println!("{USAGE}");
                return;
            }
            _ if rom_path.is_none() => rom_path = Some(arg),
            other => {
                eprintln!("unexpected argument '{other}'\n{USAGE}");
                std::process::exit(1);
            }
        }
    }

    let Some(rom_path) = rom_path else {
        eprintln!("{USAGE}");
        std::process::exit(1);
    };

    log::info!("loading ROM from '{rom_path}'");
    let rom = match std::fs::read(&rom_path) {
        Ok(rom) => rom,
        Err(e) => {
            eprintln!("failed to read ROM '{rom_path}': {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = invaders::run(&rom, dip) {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
