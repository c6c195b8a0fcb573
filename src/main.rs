use obo_exporter::cli::{parse_args, run};
use obo_vault::{init_dotenv, VaultConfig};

fn main() {
    // Cargar .env si existe para obtener OBO_VAULT_PATH
    init_dotenv();
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = VaultConfig::from_env();
    log::debug!("config vault={:?} config_dir={}", config.vault_path, config.config_dir);

    match parse_args(&args).and_then(|cmd| run(cmd, &config)) {
        Ok(output) => println!("{output}"),
        Err(e) => {
            eprintln!("[obo] {e}");
            std::process::exit(e.exit_code());
        }
    }
}
