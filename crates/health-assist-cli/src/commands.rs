use std::time::Duration;

use anyhow::Context;
use health_assist_core::report::{render_symptoms, render_vitals};
use health_assist_core::{
    evaluate, ConsultRoom, SymptomOutcome, SymptomRule, TriageEngine, VitalAlert, VitalBounds,
    VitalReading, VitalSimulator, VitalsMode,
};
use health_assist_voice::{
    dictate, CaptureConfig, CaptureResult, ExternalRecognizer, Recognition, SpeechModel,
    WavSource,
};
use serde::Serialize;
use tracing::{info, warn};

use crate::browser::BrowserLauncher;
use crate::cli::{Cli, Commands, ConsultArgs, RoomArgs, SymptomArgs, VitalArgs};
use crate::output::{print_report, print_rows};

#[derive(Debug, Serialize)]
pub struct SymptomsOut {
    pub input_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recognition: Option<Recognition>,
    pub symptoms: SymptomOutcome,
}

#[derive(Debug, Serialize)]
pub struct VitalsOut {
    pub vitals_mode: VitalsMode,
    pub reading: VitalReading,
    pub alerts: Vec<VitalAlert>,
}

#[derive(Debug, Serialize)]
pub struct ConsultOut {
    pub room: String,
    pub url: String,
    pub opened: bool,
}

pub fn run(cli: Cli, browser: &dyn BrowserLauncher) -> anyhow::Result<()> {
    let engine = TriageEngine::default();
    let json = cli.json;

    match cli.command {
        Commands::Symptoms(args) => {
            let out = assess_symptoms(&engine, &args)?;
            print_report(json, out, |o| {
                let mut text = String::new();
                if let Some(recognition) = &o.recognition {
                    text.push_str(&recognition.message());
                    text.push('\n');
                }
                text.push_str(&render_symptoms(&o.symptoms));
                text
            })
        }
        Commands::Vitals(args) => {
            let out = check_vitals(&args)?;
            print_report(json, out, |o| {
                render_vitals(&o.reading, o.vitals_mode, &o.alerts)
            })
        }
        Commands::Check {
            symptoms,
            vitals,
            room,
        } => {
            let recognition = transcribe(&symptoms)?;
            let transcript = recognition.as_ref().map_or("", Recognition::transcript);
            let typed = symptoms.text.as_deref().unwrap_or_default();

            let report = if vitals.simulate {
                engine.triage(
                    typed,
                    transcript,
                    VitalsMode::RandomSimulation,
                    simulate(vitals.seed),
                )
            } else {
                engine
                    .triage_entered_vitals(typed, transcript, vitals.entered())
                    .context("vital reading rejected")?
            };
            info!(
                report_id = %report.report_id,
                alerts = report.alerts.len(),
                "triage complete"
            );
            let consult_url = if report.needs_attention() {
                Some(room_link(&room)?.1)
            } else {
                None
            };

            print_report(json, report, |r| {
                let mut text = String::new();
                if let Some(recognition) = &recognition {
                    text.push_str(&recognition.message());
                    text.push('\n');
                }
                text.push_str(&r.to_text());
                if let Some(url) = &consult_url {
                    text.push_str(&format!("\nConsider a video consultation: {}\n", url));
                }
                text
            })
        }
        Commands::Consult(args) => {
            let out = open_consultation(&args, browser)?;
            print_report(json, out, |o| {
                if o.opened {
                    format!("Launching video call room: {}\n{}", o.room, o.url)
                } else {
                    format!("Video call room: {}\n{}", o.room, o.url)
                }
            })
        }
        Commands::Rules => {
            print_rows(json, engine.matcher().rules().rules(), format_rule)
        }
    }
}

pub fn assess_symptoms(engine: &TriageEngine, args: &SymptomArgs) -> anyhow::Result<SymptomsOut> {
    let recognition = transcribe(args)?;
    let transcript = recognition.as_ref().map_or("", Recognition::transcript);
    let typed = args.text.as_deref().unwrap_or_default();

    let (input_text, symptoms) = engine.matcher().assess(typed, transcript);
    Ok(SymptomsOut {
        input_text,
        recognition,
        symptoms,
    })
}

/// Transcribe the `--wav` recording or a live `--listen` dictation.
///
/// A missing model or unreadable file is fatal. Device and recognizer
/// failures at run time degrade to [`Recognition::Failed`].
pub fn transcribe(args: &SymptomArgs) -> anyhow::Result<Option<Recognition>> {
    if args.wav.is_none() && !args.listen {
        return Ok(None);
    }
    let program = args
        .recognizer
        .as_ref()
        .context("dictation needs a --recognizer program")?;
    let model = SpeechModel::locate(&args.model_dir)?;

    let config = CaptureConfig {
        duration: Duration::from_secs(args.listen_secs),
        ..CaptureConfig::default()
    };
    let mut recognizer = ExternalRecognizer::new(program, model);

    let result = match &args.wav {
        Some(wav) => {
            let mut source = WavSource::open(wav, &config)
                .with_context(|| format!("cannot read recording {}", wav.display()))?;
            dictate(&mut source, &mut recognizer, &config)
        }
        None => listen(&mut recognizer, &config)?,
    };

    let recognition = result.unwrap_or_else(|e| {
        warn!(error = %e, "dictation failed");
        Recognition::Failed
    });
    Ok(Some(recognition))
}

#[cfg(feature = "microphone")]
fn listen(
    recognizer: &mut ExternalRecognizer,
    config: &CaptureConfig,
) -> anyhow::Result<CaptureResult<Recognition>> {
    eprintln!(
        "Listening for {} seconds... speak now.",
        config.duration.as_secs()
    );
    let mut source = health_assist_voice::MicrophoneSource::new(config);
    Ok(dictate(&mut source, recognizer, config))
}

#[cfg(not(feature = "microphone"))]
fn listen(
    _recognizer: &mut ExternalRecognizer,
    _config: &CaptureConfig,
) -> anyhow::Result<CaptureResult<Recognition>> {
    anyhow::bail!("this build has no microphone support; rebuild with `--features microphone`")
}

pub fn check_vitals(args: &VitalArgs) -> anyhow::Result<VitalsOut> {
    let (vitals_mode, reading) = if args.simulate {
        (VitalsMode::RandomSimulation, simulate(args.seed))
    } else {
        let reading = args.entered();
        VitalBounds::INPUT
            .validate(&reading)
            .context("vital reading rejected")?;
        (VitalsMode::UserInput, reading)
    };

    Ok(VitalsOut {
        vitals_mode,
        reading,
        alerts: evaluate(&reading),
    })
}

fn simulate(seed: Option<u64>) -> VitalReading {
    match seed {
        Some(seed) => VitalSimulator::seeded(seed).sample(),
        None => VitalSimulator::new().sample(),
    }
}

/// Resolve the room link and hand it to the browser unless `--no-open`.
///
/// A browser that fails to start is logged; the link is still returned.
pub fn open_consultation(
    args: &ConsultArgs,
    browser: &dyn BrowserLauncher,
) -> anyhow::Result<ConsultOut> {
    let (room, url) = room_link(&args.target)?;

    let opened = if args.no_open {
        false
    } else {
        match browser.open(&url) {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "could not open browser");
                false
            }
        }
    };

    Ok(ConsultOut {
        room: room.name().to_string(),
        url,
        opened,
    })
}

/// The configured room and its meeting link.
pub fn room_link(args: &RoomArgs) -> anyhow::Result<(ConsultRoom, String)> {
    let room = ConsultRoom::parse(&args.room)?;
    let url = room.url_on(&args.base_url)?;
    Ok((room, url))
}

fn format_rule(rule: &SymptomRule) -> String {
    let urgent = if rule.urgent { "[urgent] " } else { "" };
    format!("{:<22} {:<22} {}{}", rule.keyword, rule.label, urgent, rule.advice)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingBrowser {
        opened: RefCell<Vec<String>>,
        fail: bool,
    }

    impl BrowserLauncher for RecordingBrowser {
        fn open(&self, url: &str) -> anyhow::Result<()> {
            if self.fail {
                anyhow::bail!("no display");
            }
            self.opened.borrow_mut().push(url.to_string());
            Ok(())
        }
    }

    fn consult_args(room: &str, no_open: bool) -> ConsultArgs {
        ConsultArgs {
            target: RoomArgs {
                room: room.to_string(),
                base_url: "https://meet.jit.si/".to_string(),
            },
            no_open,
        }
    }

    #[test]
    fn test_consultation_opens_sanitized_room() {
        let browser = RecordingBrowser::default();
        let out = open_consultation(&consult_args("Dr Smith's room", false), &browser).unwrap();

        assert_eq!(out.room, "DrSmithsroom");
        assert_eq!(out.url, "https://meet.jit.si/DrSmithsroom");
        assert!(out.opened);
        assert_eq!(*browser.opened.borrow(), vec![out.url.clone()]);
    }

    #[test]
    fn test_no_open_skips_browser() {
        let browser = RecordingBrowser::default();
        let out = open_consultation(&consult_args("", true), &browser).unwrap();

        assert_eq!(out.room, "HealthAIConsultRoom");
        assert!(!out.opened);
        assert!(browser.opened.borrow().is_empty());
    }

    #[test]
    fn test_browser_failure_still_returns_link() {
        let browser = RecordingBrowser {
            fail: true,
            ..Default::default()
        };
        let out = open_consultation(&consult_args("ward-3", false), &browser).unwrap();
        assert!(!out.opened);
        assert_eq!(out.url, "https://meet.jit.si/ward-3");
    }

    #[test]
    fn test_unusable_room_name_is_an_error() {
        let browser = RecordingBrowser::default();
        assert!(open_consultation(&consult_args("!!!", false), &browser).is_err());
    }

    #[test]
    fn test_room_link_uses_configured_base() {
        let (room, url) = room_link(&RoomArgs {
            room: "night shift".to_string(),
            base_url: "https://meet.example.org".to_string(),
        })
        .unwrap();
        assert_eq!(room.name(), "nightshift");
        assert_eq!(url, "https://meet.example.org/nightshift");
    }

    #[test]
    fn test_assess_typed_symptoms() {
        let args = SymptomArgs {
            text: Some("Bad HEADACHE and a cough".to_string()),
            ..Default::default()
        };
        let out = assess_symptoms(&TriageEngine::default(), &args).unwrap();

        assert_eq!(out.input_text, "bad headache and a cough");
        assert!(out.recognition.is_none());
        let labels = out.symptoms.detection().unwrap().labels();
        assert_eq!(labels, vec!["Headache", "Cough"]);
    }

    #[test]
    fn test_missing_model_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let args = SymptomArgs {
            wav: Some(dir.path().join("speech.wav")),
            recognizer: Some("transcribe".into()),
            model_dir: dir.path().join("no-model"),
            ..Default::default()
        };
        let err = transcribe(&args).unwrap_err();
        assert!(err.to_string().contains("Speech model not found"));
    }

    #[cfg(not(feature = "microphone"))]
    #[test]
    fn test_listen_without_microphone_support() {
        let dir = tempfile::tempdir().unwrap();
        let args = SymptomArgs {
            listen: true,
            recognizer: Some("transcribe".into()),
            model_dir: dir.path().to_path_buf(),
            listen_secs: 1,
            ..Default::default()
        };
        let err = transcribe(&args).unwrap_err();
        assert!(err.to_string().contains("no microphone support"));
    }

    #[test]
    fn test_entered_vitals_out_of_range() {
        let args = VitalArgs {
            heart_rate: Some(250),
            ..Default::default()
        };
        let err = check_vitals(&args).unwrap_err();
        assert_eq!(err.to_string(), "vital reading rejected");
    }

    #[test]
    fn test_seeded_simulation_is_reproducible() {
        let args = VitalArgs {
            simulate: true,
            seed: Some(42),
            ..Default::default()
        };
        let a = check_vitals(&args).unwrap();
        let b = check_vitals(&args).unwrap();

        assert_eq!(a.vitals_mode, VitalsMode::RandomSimulation);
        assert_eq!(a.reading, b.reading);
        assert!(VitalBounds::SIMULATION.contains(&a.reading));
    }

    #[test]
    fn test_rule_row_marks_urgent() {
        let rule = SymptomRule::new("chest pain", "Chest pain", "Seek care.").urgent();
        assert!(format_rule(&rule).contains("[urgent] Seek care."));
    }
}
