use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use clap::Parser;
use collation_rs::{
    AlignConfig, CollationReport, CollationRequest, Collator, CollatorBuilder, Meta, Report,
    REPORT_SCHEMA_VERSION,
};
use indicatif::{ProgressBar, ProgressStyle};

#[path = "collation_report/json_report_formatter.rs"]
mod json_report_formatter;

#[derive(Debug, Parser)]
#[command(name = "collation_report")]
#[command(about = "Collate witness texts against a base text and write a JSON apparatus report")]
struct Args {
    /// A request JSON file, or a directory of them.
    #[arg(long, env = "COLLATION_REPORT_INPUT")]
    input: PathBuf,
    #[arg(long, env = "COLLATION_REPORT_OUT")]
    out: Option<PathBuf>,
    /// Alignment settings applied to requests that do not carry their own.
    #[arg(long, env = "COLLATION_REPORT_CONFIG")]
    config: Option<PathBuf>,
    #[arg(long, env = "COLLATION_REPORT_LIMIT")]
    limit: Option<usize>,
    /// Keep only the summary per request, not the full groups and alignments.
    #[arg(long, env = "COLLATION_REPORT_SUMMARY_ONLY", default_value_t = false)]
    summary_only: bool,
}

#[derive(Debug)]
struct Case {
    id: String,
    request: CollationRequest,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = Args::parse();

    let default_config = match args.config.as_ref() {
        Some(path) => AlignConfig::load(path)
            .map_err(|err| format!("Failed to load config '{}': {err}", path.display()))?,
        None => AlignConfig::default(),
    };

    let mut cases = load_cases(&args.input)?;
    if let Some(limit) = args.limit {
        cases.truncate(limit);
    }
    if cases.is_empty() {
        return Err(format!(
            "No collation requests found under '{}'.",
            args.input.display()
        ));
    }

    let report = build_report(cases, default_config, args.summary_only)?;
    let failed_count = report.meta.failed_count;

    match args.out.as_ref() {
        Some(path) => {
            json_report_formatter::write_report(path, &report)?;
            eprintln!(
                "Wrote {} collation(s) ({} failed) to '{}'.",
                report.meta.request_count,
                failed_count,
                path.display()
            );
        }
        None => json_report_formatter::print_report(&report)?,
    }
    Ok(())
}

fn build_report(
    cases: Vec<Case>,
    default_config: AlignConfig,
    summary_only: bool,
) -> Result<Report, String> {
    let default_collator = build_collator(&default_config)?;
    let progress = ProgressBar::new(cases.len() as u64);
    progress.set_style(
        ProgressStyle::with_template("{spinner} [{elapsed_precise}] {bar:40} {pos}/{len} {msg}")
            .map_err(|err| format!("Invalid progress template: {err}"))?,
    );

    let mut reports = Vec::with_capacity(cases.len());
    for case in cases {
        progress.set_message(case.id.clone());
        let outcome = match case.request.config.as_ref() {
            Some(config) => build_collator(config)
                .and_then(|collator| collate_case(&collator, &case).map_err(|e| e.to_string())),
            None => collate_case(&default_collator, &case).map_err(|e| e.to_string()),
        };
        let report = match outcome {
            Ok(output) => {
                let mut report = CollationReport::success(case.id.as_str(), output);
                if summary_only {
                    report.collation = None;
                }
                report
            }
            Err(err) => {
                tracing::warn!(case = case.id.as_str(), error = err.as_str(), "collation failed");
                CollationReport::failure(case.id.as_str(), err)
            }
        };
        reports.push(report);
        progress.inc(1);
    }
    progress.finish_and_clear();

    let failed_count = reports.iter().filter(|r| r.error.is_some()).count();
    Ok(Report {
        schema_version: REPORT_SCHEMA_VERSION,
        meta: Meta {
            generated_at: Utc::now().to_rfc3339(),
            config: default_config,
            request_count: reports.len(),
            failed_count,
        },
        collations: reports,
    })
}

fn build_collator(config: &AlignConfig) -> Result<Collator, String> {
    CollatorBuilder::new(config.clone())
        .build()
        .map_err(|err| format!("Failed to build collator: {err}"))
}

fn collate_case(
    collator: &Collator,
    case: &Case,
) -> Result<collation_rs::CollationOutput, collation_rs::CollationError> {
    collator.collate(&case.request.base, &case.request.witnesses)
}

fn load_cases(input: &Path) -> Result<Vec<Case>, String> {
    if input.is_file() {
        return Ok(vec![load_case(input)?]);
    }
    let entries = fs::read_dir(input)
        .map_err(|err| format!("Failed to read input directory '{}': {err}", input.display()))?;
    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|err| {
            format!("Failed to read entry in '{}': {err}", input.display())
        })?;
        let path = entry.path();
        if path.extension().and_then(|ext| ext.to_str()) == Some("json") {
            paths.push(path);
        }
    }
    paths.sort();
    paths.iter().map(|path| load_case(path)).collect()
}

fn load_case(path: &Path) -> Result<Case, String> {
    let data = fs::read_to_string(path)
        .map_err(|err| format!("Failed to read request '{}': {err}", path.display()))?;
    let request: CollationRequest = serde_json::from_str(&data)
        .map_err(|err| format!("Failed to parse request '{}': {err}", path.display()))?;
    let id = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or(request.base.id.as_str())
        .to_string();
    Ok(Case { id, request })
}

#[cfg(test)]
mod tests {
    use super::*;
    use collation_rs::WitnessText;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "collation_report_{name}_{}",
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).expect("create scratch dir");
        dir
    }

    fn case(id: &str, base: &str, witnesses: &[&str], config: Option<AlignConfig>) -> Case {
        Case {
            id: id.to_string(),
            request: CollationRequest {
                base: WitnessText::new("base", base),
                witnesses: witnesses
                    .iter()
                    .enumerate()
                    .map(|(i, text)| WitnessText::new(format!("w{i}"), *text))
                    .collect(),
                config,
            },
        }
    }

    #[test]
    fn load_cases_reads_sorted_json_and_skips_other_files() {
        let dir = scratch_dir("load");
        let request = r#"{ "base": { "id": "b", "text": "the cat" },
                           "witnesses": [{ "id": "A", "text": "the cat" }] }"#;
        fs::write(dir.join("b-second.json"), request).expect("write");
        fs::write(dir.join("a-first.json"), request).expect("write");
        fs::write(dir.join("notes.txt"), "not a request").expect("write");

        let cases = load_cases(&dir).expect("directory loads");
        let ids: Vec<&str> = cases.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["a-first", "b-second"]);
        assert_eq!(cases[0].request.witnesses[0].id, "A");

        let single = load_cases(&dir.join("b-second.json")).expect("file loads");
        assert_eq!(single.len(), 1);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn load_case_reports_malformed_json() {
        let dir = scratch_dir("malformed");
        let path = dir.join("broken.json");
        fs::write(&path, "{ \"base\": ").expect("write");
        let err = load_case(&path).unwrap_err();
        assert!(err.contains("Failed to parse request"), "{err}");
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn build_report_keeps_failures_per_request() {
        let bad_config = AlignConfig {
            filler: ' ',
            ..AlignConfig::default()
        };
        let cases = vec![
            case("ok", "the cat sat", &["the cat sit"], None),
            case("bad-config", "the cat", &["the cat"], Some(bad_config)),
            case("no-witnesses", "the cat", &[], None),
        ];
        let report = build_report(cases, AlignConfig::default(), false).expect("report builds");

        assert_eq!(report.schema_version, REPORT_SCHEMA_VERSION);
        assert_eq!(report.meta.request_count, 3);
        assert_eq!(report.meta.failed_count, 2);
        let ok = &report.collations[0];
        assert!(ok.error.is_none());
        assert_eq!(ok.summary.as_ref().map(|s| s.group_count), Some(3));
        assert!(ok.collation.is_some());
        assert!(report.collations[1].error.is_some());
        assert!(report.collations[2].error.is_some());
    }

    #[test]
    fn request_config_overrides_default() {
        let custom = AlignConfig {
            bracket_open: '[',
            bracket_close: ']',
            ..AlignConfig::default()
        };
        let cases = vec![case("custom", "[f. 1r]the cat", &["the cat"], Some(custom))];
        let report = build_report(cases, AlignConfig::default(), true).expect("report builds");
        let entry = &report.collations[0];
        assert!(entry.collation.is_none());
        let summary = entry.summary.as_ref().expect("summary kept");
        assert_eq!(summary.divergent_group_count, 0);
    }

    #[test]
    fn written_report_parses_back() {
        let dir = scratch_dir("write");
        let path = dir.join("nested").join("report.json");
        let cases = vec![case("ok", "in principio", &["in principio"], None)];
        let report = build_report(cases, AlignConfig::default(), false).expect("report builds");
        json_report_formatter::write_report(&path, &report).expect("report writes");

        let data = fs::read_to_string(&path).expect("report readable");
        assert!(data.ends_with('\n'));
        let json: serde_json::Value = serde_json::from_str(&data).expect("valid json");
        assert_eq!(json["schema_version"], 1);
        assert_eq!(json["meta"]["failed_count"], 0);
        assert_eq!(json["collations"][0]["id"], "ok");
        assert_eq!(json["collations"][0]["collation"]["groups"][1]["base_text"], "principio");
        let _ = fs::remove_dir_all(&dir);
    }
}
