//! File-driven analysis in the shape the CLI uses: write fixtures to a temp
//! directory, read them back, analyze, and gate on density.

use std::fs;
use tempfile::TempDir;

use lucidity::{Analyzer, Config, Level};

struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn new() -> Self {
        Self {
            dir: TempDir::new().expect("temp dir"),
        }
    }

    fn write(&self, name: &str, content: &str) -> std::path::PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, content).expect("write fixture");
        path
    }
}

#[tokio::test]
async fn test_analyze_markdown_file() {
    let fixture = Fixture::new();
    let path = fixture.write(
        "draft.md",
        "# Draft\n\nIn today's society, many things cause problems.\n",
    );

    let text = tokio::fs::read_to_string(&path).await.expect("read");
    let result = Analyzer::with_default_provider()
        .analyze(&text, &Config::default())
        .expect("analysis");

    assert!(result.summary.flag_count >= 3); // filler + vagueness + causal
    assert_eq!(result.summary.paragraph_count, 2);
}

#[tokio::test]
async fn test_density_gate_for_ci() {
    let fixture = Fixture::new();
    let dense = fixture.write(
        "dense.txt",
        "The spectrometer recorded seventeen measurements across four channels.\n",
    );
    let thin = fixture.write(
        "thin.txt",
        "It could perhaps possibly maybe be argued that some things sometimes matter somewhat.\n",
    );

    let analyzer = Analyzer::with_default_provider();
    let config = Config::with_level(Level::Standard);

    let dense_text = tokio::fs::read_to_string(&dense).await.unwrap();
    let thin_text = tokio::fs::read_to_string(&thin).await.unwrap();

    let dense_density = analyzer.analyze(&dense_text, &config).unwrap().summary.density;
    let thin_density = analyzer.analyze(&thin_text, &config).unwrap().summary.density;

    assert!(
        dense_density > thin_density,
        "dense {dense_density} should beat thin {thin_density}"
    );
}

#[tokio::test]
async fn test_crlf_file_round_trip() {
    let fixture = Fixture::new();
    let path = fixture.write(
        "windows.txt",
        "Freedom is the state of being free.\r\n\r\nA second paragraph sits here.\r\n",
    );

    let text = tokio::fs::read_to_string(&path).await.unwrap();
    let result = Analyzer::with_default_provider()
        .analyze(&text, &Config::default())
        .unwrap();

    for flag in result.flags() {
        assert_eq!(&text[flag.span.start..flag.span.end], flag.term);
    }
    assert!(result
        .flags()
        .any(|f| f.flag_type == lucidity::FlagType::Circular));
}
