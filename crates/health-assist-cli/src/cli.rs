use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use health_assist_core::teleconsult::{DEFAULT_MEET_BASE, DEFAULT_ROOM};
use health_assist_core::VitalReading;

/// Longest recording the CLI accepts.
pub const MAX_LISTEN_SECS: u64 = 300;

#[derive(Parser, Debug)]
#[command(
    name = "health-assist",
    version,
    about = "Symptom checker, vital-sign triage and teleconsultation launcher"
)]
pub struct Cli {
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub json: bool,
    #[arg(
        long,
        global = true,
        env = "HEALTH_ASSIST_LOG",
        help = "Log filter, e.g. `info` or `health_assist_voice=debug` (falls back to RUST_LOG)"
    )]
    pub log_level: Option<String>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Detect symptoms in typed and/or dictated text
    Symptoms(SymptomArgs),
    /// Evaluate entered or simulated vital signs
    Vitals(VitalArgs),
    /// Run symptoms and vitals together and print a full report
    Check {
        #[command(flatten)]
        symptoms: SymptomArgs,
        #[command(flatten)]
        vitals: VitalArgs,
        #[command(flatten)]
        room: RoomArgs,
    },
    /// Open a video consultation room
    Consult(ConsultArgs),
    /// List the keyword table
    Rules,
}

#[derive(Args, Debug, Clone, Default)]
pub struct SymptomArgs {
    #[arg(long, short = 't', help = "Typed symptom description")]
    pub text: Option<String>,
    #[arg(
        long,
        requires = "recognizer",
        help = "16 kHz mono 16-bit WAV recording to transcribe"
    )]
    pub wav: Option<PathBuf>,
    #[arg(
        long,
        conflicts_with = "wav",
        requires = "recognizer",
        help = "Dictate from the default microphone (needs the `microphone` feature)"
    )]
    pub listen: bool,
    #[arg(
        long,
        env = "HEALTH_ASSIST_RECOGNIZER",
        help = "Speech-to-text program; called as <program> <model_dir> <sample_rate> with PCM on stdin"
    )]
    pub recognizer: Option<PathBuf>,
    #[arg(long, env = "HEALTH_ASSIST_MODEL_DIR", default_value = "model")]
    pub model_dir: PathBuf,
    #[arg(
        long,
        default_value_t = 5,
        value_parser = clap::value_parser!(u64).range(1..=MAX_LISTEN_SECS),
        help = "Recording time limit in seconds"
    )]
    pub listen_secs: u64,
}

#[derive(Args, Debug, Clone, Default)]
pub struct VitalArgs {
    #[arg(long, conflicts_with = "simulate", help = "Body temperature in °C")]
    pub temperature: Option<f64>,
    #[arg(long, conflicts_with = "simulate", help = "Heart rate in bpm")]
    pub heart_rate: Option<i32>,
    #[arg(long, conflicts_with = "simulate", help = "Systolic pressure in mmHg")]
    pub systolic: Option<i32>,
    #[arg(long, conflicts_with = "simulate", help = "Diastolic pressure in mmHg")]
    pub diastolic: Option<i32>,
    #[arg(long, help = "Generate a random reading instead")]
    pub simulate: bool,
    #[arg(long, requires = "simulate", help = "Seed for a reproducible simulation")]
    pub seed: Option<u64>,
}

impl VitalArgs {
    /// Entered reading; unset fields take the resting defaults.
    pub fn entered(&self) -> VitalReading {
        let base = VitalReading::default();
        VitalReading::new(
            self.temperature.unwrap_or(base.temperature),
            self.heart_rate.unwrap_or(base.heart_rate),
            self.systolic.unwrap_or(base.systolic),
            self.diastolic.unwrap_or(base.diastolic),
        )
    }
}

/// Which video room to use; shared by `consult` and `check`.
#[derive(Args, Debug, Clone)]
pub struct RoomArgs {
    #[arg(long, env = "HEALTH_ASSIST_ROOM", default_value = DEFAULT_ROOM)]
    pub room: String,
    #[arg(long, env = "HEALTH_ASSIST_MEET_BASE", default_value = DEFAULT_MEET_BASE)]
    pub base_url: String,
}

#[derive(Args, Debug, Clone)]
pub struct ConsultArgs {
    #[command(flatten)]
    pub target: RoomArgs,
    #[arg(long, help = "Print the room link without opening a browser")]
    pub no_open: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_symptoms_text() {
        let cli = Cli::try_parse_from(["health-assist", "symptoms", "--text", "I have a fever"])
            .unwrap();
        match cli.command {
            Commands::Symptoms(args) => {
                assert_eq!(args.text.as_deref(), Some("I have a fever"));
                assert!(args.wav.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
        assert!(!cli.json);
    }

    #[test]
    fn test_wav_requires_recognizer() {
        let result = Cli::try_parse_from([
            "health-assist",
            "symptoms",
            "--wav",
            "speech.wav",
            "--recognizer",
            "vosk-transcribe",
        ]);
        assert!(result.is_ok());

        let result = Cli::try_parse_from(["health-assist", "symptoms", "--wav", "speech.wav"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_listen_conflicts_with_wav() {
        let cli = Cli::try_parse_from([
            "health-assist",
            "symptoms",
            "--listen",
            "--recognizer",
            "vosk-transcribe",
        ])
        .unwrap();
        let Commands::Symptoms(args) = cli.command else {
            panic!("expected symptoms");
        };
        assert!(args.listen);

        let result = Cli::try_parse_from([
            "health-assist",
            "symptoms",
            "--listen",
            "--wav",
            "speech.wav",
            "--recognizer",
            "vosk-transcribe",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_listen_secs_is_bounded() {
        let cli = Cli::try_parse_from(["health-assist", "symptoms", "--listen-secs", "30"]).unwrap();
        let Commands::Symptoms(args) = cli.command else {
            panic!("expected symptoms");
        };
        assert_eq!(args.listen_secs, 30);

        for secs in ["0", "301", "18446744073709551615"] {
            let result = Cli::try_parse_from(["health-assist", "symptoms", "--listen-secs", secs]);
            assert!(result.is_err(), "{secs} should be rejected");
        }
    }

    #[test]
    fn test_entered_vitals_fill_defaults() {
        let cli = Cli::try_parse_from(["health-assist", "vitals", "--temperature", "38.4"]).unwrap();
        let Commands::Vitals(args) = cli.command else {
            panic!("expected vitals");
        };
        assert_eq!(args.entered(), VitalReading::new(38.4, 75, 120, 80));
    }

    #[test]
    fn test_simulate_conflicts_with_entered_values() {
        let result = Cli::try_parse_from([
            "health-assist",
            "vitals",
            "--simulate",
            "--heart-rate",
            "80",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_seed_requires_simulate() {
        assert!(Cli::try_parse_from(["health-assist", "vitals", "--seed", "7"]).is_err());
        assert!(
            Cli::try_parse_from(["health-assist", "vitals", "--simulate", "--seed", "7"]).is_ok()
        );
    }

    #[test]
    fn test_check_flattens_argument_groups() {
        let cli = Cli::try_parse_from([
            "health-assist",
            "--json",
            "check",
            "--text",
            "cough",
            "--systolic",
            "150",
            "--room",
            "ward-2",
        ])
        .unwrap();
        assert!(cli.json);
        let Commands::Check {
            symptoms,
            vitals,
            room,
        } = cli.command
        else {
            panic!("expected check");
        };
        assert_eq!(symptoms.text.as_deref(), Some("cough"));
        assert_eq!(vitals.systolic, Some(150));
        assert_eq!(room.room, "ward-2");
    }

    #[test]
    fn test_consult_defaults() {
        let cli = Cli::try_parse_from(["health-assist", "consult", "--no-open"]).unwrap();
        let Commands::Consult(args) = cli.command else {
            panic!("expected consult");
        };
        assert_eq!(args.target.room, DEFAULT_ROOM);
        assert_eq!(args.target.base_url, DEFAULT_MEET_BASE);
        assert!(args.no_open);
    }
}
