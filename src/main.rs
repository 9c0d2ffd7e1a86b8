use filament::ui::output;

fn main() {
    if let Err(err) = filament::cli::run() {
        output::error(format!("{:#}", err));
        std::process::exit(1);
    }
}
