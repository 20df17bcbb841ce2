use clap::{Arg, ArgAction, Command};
use latex_translate::input::{InputError, TranslationRequest};
use latex_translate::mt::{
    MachineTranslator, MockMode, MockTranslator, TranslationOutcome, provider_from_env,
    translate_protected, translate_with_outcome,
};
use std::io::{IsTerminal, Read};
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let matches = Command::new("latex-translate")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Translate text while keeping embedded LaTeX markup verbatim")
        .arg(
            Arg::new("source")
                .help("Source language code, or 'auto' to detect")
                .index(1),
        )
        .arg(
            Arg::new("target")
                .help("Target language code (e.g., en, hi, fr)")
                .index(2),
        )
        .arg(
            Arg::new("text")
                .help("Text to translate (ignored when stdin is piped)")
                .index(3),
        )
        .arg(
            Arg::new("mock")
                .long("mock")
                .short('m')
                .help("Use the offline identity translator instead of Google Translate")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Show masked text and restoration details on stderr")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    let use_mock = matches.get_flag("mock");
    let verbose = matches.get_flag("verbose");
    init_logging(verbose);

    let positional: Vec<String> = ["source", "target", "text"]
        .iter()
        .filter_map(|id| matches.get_one::<String>(id).cloned())
        .collect();

    let request = match frame_request(&positional) {
        Ok(request) => request,
        Err(InputError::Usage(usage)) => {
            eprintln!("{}", usage);
            return ExitCode::FAILURE;
        }
        Err(e) => {
            println!("Error: {}", e);
            return ExitCode::SUCCESS;
        }
    };

    let translator: Arc<dyn MachineTranslator> = if use_mock {
        Arc::new(MockTranslator::new(MockMode::NoOp))
    } else {
        match provider_from_env() {
            Ok(provider) => provider,
            Err(e) => {
                println!("Error: {}", e.message());
                return ExitCode::SUCCESS;
            }
        }
    };

    let output = if verbose {
        eprintln!("📝 Source: {:?}", request.text);
        eprintln!("🌍 {} → {} via {}", request.source, request.target, translator.provider_name());

        match translate_with_outcome(
            translator.as_ref(),
            &request.text,
            &request.source,
            &request.target,
        )
        .await
        {
            Ok(outcome) => {
                print_outcome(&outcome);
                outcome.restoration.restored_text
            }
            Err(e) => format!("Error: {}", e.message()),
        }
    } else {
        translate_protected(
            translator.as_ref(),
            &request.text,
            &request.source,
            &request.target,
        )
        .await
    };

    println!("{}", output);
    ExitCode::SUCCESS
}

fn frame_request(positional: &[String]) -> Result<TranslationRequest, InputError> {
    let stdin = std::io::stdin();
    TranslationRequest::frame(positional, stdin.is_terminal(), || {
        let mut payload = String::new();
        stdin.lock().read_to_string(&mut payload)?;
        Ok(payload)
    })
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_outcome(outcome: &TranslationOutcome) {
    eprintln!("📦 Masked ({} spans): {:?}", outcome.masked.span_count(), outcome.masked.text);
    for span in &outcome.masked.spans {
        eprintln!("   [{}] {:<15} {:?}", span.index, span.rule.name(), span.original_text);
    }
    eprintln!("🌍 Translated: {:?}", outcome.translated_text);
    eprintln!(
        "🔧 Restored {} token(s){}",
        outcome.restoration.restored_count,
        if outcome.restoration.reordering_detected {
            ", reordered"
        } else {
            ""
        }
    );
}
