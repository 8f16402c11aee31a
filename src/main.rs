#[cfg(feature = "cli")]
use structopt::StructOpt;

#[cfg(feature = "cli")]
fn main() -> Result<(), gasbank::bank::BankError> {
    env_logger::init();
    let opt = gasbank::cli::Opt::from_args();
    gasbank::cli::run(opt)
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("gasbank was built without the `cli` feature");
}
