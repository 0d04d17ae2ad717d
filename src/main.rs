//! Command-line interface for the grid-filling solver

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use crossword_fill::{
    config::{CliOverrides, Settings},
    fill::FillProblem,
    puzzle::{create_example_word_lists, load_words_from_file},
    utils::{ColorOutput, SolutionFormatter},
};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "crossword_fill")]
#[command(about = "Crossword grid filler backed by a SAT solver")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fill a grid from a word list
    Solve {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Word list file (overrides config)
        #[arg(short, long)]
        words: Option<PathBuf>,

        /// Grid side length (overrides config)
        #[arg(short, long)]
        size: Option<usize>,

        /// Maximum fillings to find (overrides config)
        #[arg(short, long)]
        max_solutions: Option<usize>,

        /// Output directory (overrides config)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Show which word each row and column matched
        #[arg(long)]
        show_lines: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Create example configuration and word-list files
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },

    /// Analyze a word list and grid size without solving
    Analyze {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Word list file (overrides config)
        #[arg(short, long)]
        words: Option<PathBuf>,

        /// Grid side length (overrides config)
        #[arg(short, long)]
        size: Option<usize>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Solve {
            config,
            words,
            size,
            max_solutions,
            output,
            show_lines,
            verbose,
        } => solve_command(config, words, size, max_solutions, output, show_lines, verbose),
        Commands::Setup { directory, force } => setup_command(directory, force),
        Commands::Analyze {
            config,
            words,
            size,
        } => analyze_command(config, words, size),
    }
}

fn load_settings(config_path: &PathBuf) -> Result<Settings> {
    if config_path.exists() {
        Settings::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))
    } else {
        println!(
            "{}",
            ColorOutput::warning(&format!(
                "Config file {} not found, using defaults",
                config_path.display()
            ))
        );
        Ok(Settings::default())
    }
}

fn solve_command(
    config_path: PathBuf,
    word_list: Option<PathBuf>,
    size: Option<usize>,
    max_solutions: Option<usize>,
    output_dir: Option<PathBuf>,
    show_lines: bool,
    verbose: bool,
) -> Result<()> {
    println!("{}", ColorOutput::info("Starting crossword grid filler"));

    let mut settings = load_settings(&config_path)?;

    let cli_overrides = CliOverrides {
        size,
        max_solutions,
        word_list,
        output_dir,
    };
    settings.merge_with_cli(&cli_overrides);

    if verbose {
        println!("Configuration:");
        println!("  Grid size: {}", settings.puzzle.size);
        println!("  Max solutions: {}", settings.solver.max_solutions);
        println!("  Word list: {}", settings.input.word_list_file.display());
        println!("  Output dir: {}", settings.output.output_directory.display());
        println!();
    }

    settings.validate().context("Configuration validation failed")?;

    let start_time = Instant::now();
    let mut problem =
        FillProblem::new(settings.clone()).context("Failed to create fill problem")?;

    if verbose {
        println!("{}", problem.estimate_complexity());
    }

    let solutions = problem.solve().context("Failed to solve fill problem")?;
    let total_time = start_time.elapsed();

    if solutions.is_empty() {
        println!("{}", ColorOutput::warning("No solutions found"));
        return Ok(());
    }

    println!(
        "{}",
        ColorOutput::success(&format!(
            "Found {} solution(s) in {:.3}s",
            solutions.len(),
            total_time.as_secs_f64()
        ))
    );

    println!("\n{}", SolutionFormatter::format_solution_summary(&solutions));
    for (i, solution) in solutions.iter().enumerate() {
        println!("{}", ColorOutput::info(&format!("Solution {}:", i + 1)));
        println!("{}", SolutionFormatter::format_solution(solution, show_lines));
    }

    if settings.output.save_solutions {
        SolutionFormatter::save_solutions(
            &solutions,
            &settings.output.output_directory,
            &settings.output.format,
        )
        .context("Failed to save solutions")?;

        println!(
            "{}",
            ColorOutput::success(&format!(
                "Solutions saved to {}",
                settings.output.output_directory.display()
            ))
        );
    }

    if verbose {
        println!("{}", problem.encoding_statistics()?);
    }

    Ok(())
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    println!("{}", ColorOutput::info("Setting up project structure..."));

    let config_dir = directory.join("config");
    let input_dir = directory.join("input/words");
    let output_dir = directory.join("output/solutions");

    for dir in [&config_dir, &input_dir, &output_dir] {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }

    let config_path = config_dir.join("default.yaml");
    if !config_path.exists() || force {
        let default_settings = Settings::default();
        default_settings
            .to_file(&config_path)
            .context("Failed to create default configuration")?;
        println!("Created: {}", config_path.display());
    } else {
        println!("Skipped: {} (already exists)", config_path.display());
    }

    create_example_word_lists(&input_dir).context("Failed to create example word lists")?;
    println!("Created example word lists in: {}", input_dir.display());

    // a small 2x2 starter configuration next to the default
    let mut tiny_config = Settings::default();
    tiny_config.puzzle.size = 2;
    tiny_config.input.word_list_file = PathBuf::from("input/words/tiny.txt");
    tiny_config.to_file(&config_dir.join("tiny.yaml"))?;

    println!("{}", ColorOutput::success("Setup complete!"));
    println!("\nNext steps:");
    println!("1. Edit configuration files in {}", config_dir.display());
    println!("2. Add your word lists to {}", input_dir.display());
    println!("3. Run: cargo run -- solve --config config/default.yaml");

    Ok(())
}

fn analyze_command(
    config_path: PathBuf,
    word_list: Option<PathBuf>,
    size: Option<usize>,
) -> Result<()> {
    println!("{}", ColorOutput::info("Analyzing problem..."));

    let mut settings = load_settings(&config_path)?;
    let cli_overrides = CliOverrides {
        size,
        word_list,
        ..Default::default()
    };
    settings.merge_with_cli(&cli_overrides);

    let words = load_words_from_file(&settings.input.word_list_file).with_context(|| {
        format!(
            "Failed to load word list from {}",
            settings.input.word_list_file.display()
        )
    })?;

    println!("Word list: {} words", words.len());
    let usable = words
        .iter()
        .filter(|w| w.chars().count() <= settings.puzzle.size)
        .count();
    println!(
        "  {} fit a {}-cell line",
        usable, settings.puzzle.size
    );

    let problem = FillProblem::with_words(settings, words)
        .context("Failed to create problem for analysis")?;

    println!("\n{}", problem.estimate_complexity());
    println!("{}", problem.encoding_statistics()?);

    Ok(())
}
