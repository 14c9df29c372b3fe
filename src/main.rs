use log::error;

fn main() {
    env_logger::init();

    if let Err(e) = deep_sea_report::get_arg().and_then(deep_sea_report::run) {
        error!("{e}");
        std::process::exit(-1);
    }
}
