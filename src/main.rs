//! Geração em lote dos relatórios mensais.
//!
//! Percorre os clientes do arquivo de configuração, gera o e-mail HTML de
//! cada um e aciona a entrega escolhida. Falha de um cliente não interrompe
//! o lote.

use std::path::PathBuf;
use std::process;

use chrono::NaiveDate;
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use mmzr_report::{
    save_report, ClientConfig, LoggingDispatcher, MailClientDispatcher, ReportBuilder,
    ReportDispatcher, ReportError, ReportGenerator, RunConfig, WorkbookReader,
};

#[derive(Parser, Debug)]
#[command(
    name = "mmzr-report",
    version,
    about = "Gera os relatórios mensais de performance a partir da planilha de rentabilidade"
)]
struct Cli {
    /// Arquivo de configuração JSON com planilha, clientes e carteiras
    #[arg(long, default_value = "mmzr_config.json")]
    config: PathBuf,

    /// Gera apenas para o cliente com este nome ou e-mail
    #[arg(long)]
    cliente: Option<String>,

    /// Lista os clientes disponíveis e sai
    #[arg(long)]
    listar: bool,

    /// Abre o compositor de e-mail após salvar cada relatório
    #[arg(long)]
    enviar: bool,

    /// Diretório de saída dos relatórios (padrão: o da configuração)
    #[arg(long)]
    saida: Option<PathBuf>,

    /// Data de referência (aaaa-mm-dd); padrão: hoje
    #[arg(long)]
    data: Option<NaiveDate>,
}

/// Inicializa o tracing lendo o nível de `RUST_LOG`, com "info" como padrão.
fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();
}

fn main() {
    setup_logging();

    let cli = Cli::parse();
    if let Err(error) = run(cli) {
        tracing::error!(erro = %error, "execução abortada");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), ReportError> {
    let run_config = RunConfig::load(&cli.config)?;

    if cli.listar {
        println!("Clientes disponíveis:");
        for client in &run_config.clients {
            println!(
                "- {} <{}> ({} carteira(s))",
                client.name,
                if client.email.is_empty() {
                    "sem e-mail"
                } else {
                    client.email.as_str()
                },
                client.portfolios.len()
            );
        }
        return Ok(());
    }

    let clients: Vec<&ClientConfig> = match &cli.cliente {
        Some(needle) => {
            let client = run_config.find_client(needle).ok_or_else(|| {
                ReportError::Config(format!(
                    "cliente com nome ou e-mail '{}' não encontrado",
                    needle
                ))
            })?;
            vec![client]
        }
        None => run_config.clients.iter().collect(),
    };

    let mut builder = ReportBuilder::new();
    if let Some(date) = cli.data {
        builder = builder.with_reference_date(date);
    }
    let generator = builder.build()?;

    let output_dir = cli.saida.clone().unwrap_or_else(|| run_config.output_dir.clone());
    let dispatcher: Box<dyn ReportDispatcher> = if cli.enviar {
        Box::new(MailClientDispatcher)
    } else {
        Box::new(LoggingDispatcher)
    };

    let mut failures = 0usize;
    for client in clients {
        match generate_for_client(
            &generator,
            &run_config,
            client,
            &output_dir,
            dispatcher.as_ref(),
        ) {
            Ok(path) => {
                tracing::info!(
                    cliente = %client.name,
                    arquivo = %path.display(),
                    "relatório gerado"
                );
            }
            Err(error) => {
                failures += 1;
                tracing::error!(
                    cliente = %client.name,
                    erro = %error,
                    "não foi possível gerar o relatório do cliente"
                );
            }
        }
    }

    if failures > 0 {
        tracing::warn!(falhas = failures, "lote concluído com falhas");
    }
    Ok(())
}

/// Gera, salva e entrega o relatório de um único cliente.
fn generate_for_client(
    generator: &ReportGenerator,
    run_config: &RunConfig,
    client: &ClientConfig,
    output_dir: &std::path::Path,
    dispatcher: &dyn ReportDispatcher,
) -> Result<PathBuf, ReportError> {
    let mut workbook = WorkbookReader::open(&run_config.workbook_path)?;
    let html = generator.generate_client_report(&mut workbook, client)?;
    let path = save_report(
        &html,
        &client.name,
        generator.config().reference_date,
        output_dir,
    )?;

    if client.email.is_empty() {
        tracing::warn!(cliente = %client.name, "cliente sem e-mail configurado, entrega ignorada");
    } else {
        dispatcher.dispatch(&client.email, &generator.email_subject(), &path)?;
    }
    Ok(path)
}
