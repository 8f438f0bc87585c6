use log::error;

fn main() {
    env_logger::init();

    if let Err(e) = ais_track::get_arg().and_then(ais_track::run) {
        error!("{e:#}");
        std::process::exit(-1);
    }
}
