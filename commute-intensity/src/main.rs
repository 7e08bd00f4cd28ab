use clap::Parser;
use commute_intensity::app::IntensityApp;

fn main() {
    env_logger::init();
    let args = IntensityApp::parse();
    match args.op.run() {
        Ok(_) => {}
        Err(e) => {
            log::error!("commute-intensity failed: {e}");
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}
