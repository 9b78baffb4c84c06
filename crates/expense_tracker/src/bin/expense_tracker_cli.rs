use expense_tracker::cli::run_cli;

fn main() {
    expense_tracker::init();
    if let Err(err) = run_cli() {
        eprintln!("expense tracker: {err}");
        std::process::exit(1);
    }
}
