use imgauth_core::analyzer::ImageAnalyzer;
use imgauth_core::batch::BatchAnalyzer;
use imgauth_core::extract::ExifToolSource;
use imgauth_core::report::render_report;
use std::path::PathBuf;

enum Mode {
    Report,
    Quick,
    Json,
    Batch,
}

fn usage() -> ! {
    eprintln!("usage: scan_runner [--exiftool <path>] [--quick|--json|--batch] <image-or-directory>");
    std::process::exit(2);
}

fn main() {
    env_logger::init();

    let mut exiftool: Option<String> = None;
    let mut mode = Mode::Report;
    let mut target: Option<PathBuf> = None;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--exiftool" => match args.next() {
                Some(path) => exiftool = Some(path),
                None => usage(),
            },
            "--quick" => mode = Mode::Quick,
            "--json" => mode = Mode::Json,
            "--batch" => mode = Mode::Batch,
            other if other.starts_with('-') => {
                eprintln!("unknown option: {}", other);
                usage();
            }
            other => {
                if target.is_some() {
                    usage();
                }
                target = Some(PathBuf::from(other));
            }
        }
    }
    let target = match target {
        Some(path) => path,
        None => usage(),
    };

    let mut source = ExifToolSource::new();
    if let Some(path) = exiftool {
        source = source.with_exiftool_path(path);
    }
    let analyzer = ImageAnalyzer::new(Box::new(source));

    match mode {
        Mode::Report => match analyzer.analyze(&target) {
            Ok(report) => {
                for line in render_report(&report) {
                    println!("{}", line);
                }
            }
            Err(e) => {
                eprintln!("analysis error: {}", e);
                std::process::exit(1);
            }
        },
        Mode::Quick => {
            println!("{}", analyzer.quick_check(&target));
        }
        Mode::Json => match analyzer.analyze(&target) {
            Ok(report) => {
                println!("{}", serde_json::to_string_pretty(&report).unwrap());
            }
            Err(e) => {
                eprintln!("analysis error: {}", e);
                std::process::exit(1);
            }
        },
        Mode::Batch => {
            let batch = BatchAnalyzer::new(analyzer);
            match batch.analyze_directory_with_summary(&target) {
                Ok(lines) => {
                    for line in lines {
                        println!("{}", line);
                    }
                }
                Err(e) => {
                    eprintln!("batch error: {}", e);
                    std::process::exit(1);
                }
            }
        }
    }
}
