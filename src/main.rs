use clap::Parser;
use dialoguer::Confirm;
use melodygrid::{
    analysis::{bucket_durations, bucket_histogram, inter_onset_notes},
    cli::{token_output_path, validate_output_name, Args, Command},
    codec::{trim_silence, Resolution},
    config::{Settings, DEFAULT_TICKS_PER_BEAT},
    logging,
    midi::{write_track_with_length, MidiFile, TrackSelector},
    pipeline::{decode_tokens, encode_file, encode_selected, render_tokens},
    tokens::load_tokens,
    ui::{create_file_progress, create_hidden_progress, format_histogram, format_tokens},
    Error, Result,
};
use std::path::{Path, PathBuf};

const ONSET_BUCKETS: usize = 8;
const PREVIEW_TOKENS: usize = 32;

fn main() {
    let args = Args::parse();
    initialize_logging(args.verbose);

    let settings = match Settings::load(args.config.as_deref()) {
        Ok(settings) => settings,
        Err(e) => exit_with_error(&e),
    };

    let outcome = match args.command {
        Command::Encode {
            inputs,
            track,
            subdivision,
            output_dir,
            raw,
            render,
            force,
        } => {
            let settings = settings.with_overrides(subdivision, track, output_dir);
            run_encode(&inputs, &settings, raw, render.as_deref(), force)
        }
        Command::Decode {
            input,
            output,
            ticks_per_beat,
            subdivision,
            output_dir,
            force,
        } => {
            let settings = settings.with_overrides(None, None, output_dir);
            run_decode(&input, &output, ticks_per_beat, subdivision, &settings, force)
        }
        Command::Inspect {
            input,
            track,
            subdivision,
        } => {
            let settings = settings.with_overrides(subdivision, track, None);
            run_inspect(&input, &settings)
        }
    };

    if let Err(e) = outcome {
        exit_with_error(&e);
    }
    log::info!("Done");
}

fn initialize_logging(verbose: bool) {
    if let Err(e) = logging::init_logger(verbose) {
        eprintln!("Warning: {}", e);
    }
    log::info!("Application starting");
}

fn exit_with_error(error: &Error) -> ! {
    log::error!("{}", error);
    eprintln!("Error: {}", error);
    std::process::exit(1);
}

fn confirm_overwrite(path: &Path, force: bool) -> Result<bool> {
    if force || !path.exists() {
        return Ok(true);
    }
    let confirmed = Confirm::new()
        .with_prompt(format!("{} already exists. Overwrite?", path.display()))
        .default(false)
        .interact()?;
    if !confirmed {
        log::info!("Skipped existing {}", path.display());
    }
    Ok(confirmed)
}

/// Encodes every input, skipping files that fail. Errors if any file failed.
fn run_encode(
    inputs: &[PathBuf],
    settings: &Settings,
    raw: bool,
    render: Option<&str>,
    force: bool,
) -> Result<()> {
    if let Some(name) = render {
        validate_output_name(name).map_err(Error::InvalidArgument)?;
    }
    let selector = TrackSelector::new(&settings.track)?;

    let pb = if inputs.len() > 1 {
        create_file_progress(inputs.len())
    } else {
        create_hidden_progress()
    };

    let mut failed = 0;
    for input in inputs {
        pb.set_message(input.display().to_string());
        let result = encode_one(input, &selector, settings, raw, render, force, &pb);
        if let Err(e) = result {
            failed += 1;
            log::error!("Cannot encode {}: {}", input.display(), e);
            pb.suspend(|| eprintln!("Cannot encode {}: {}", input.display(), e));
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    if failed > 0 {
        return Err(Error::BatchFailed {
            failed,
            total: inputs.len(),
        });
    }
    Ok(())
}

fn encode_one(
    input: &Path,
    selector: &TrackSelector,
    settings: &Settings,
    raw: bool,
    render: Option<&str>,
    force: bool,
    pb: &indicatif::ProgressBar,
) -> Result<()> {
    let encoded = encode_file(input, selector, settings.subdivision)?;
    if encoded.matched_tracks == 0 {
        pb.suspend(|| {
            eprintln!(
                "No '{}' track found in {}",
                settings.track,
                input.display()
            )
        });
    }

    let token_path = token_output_path(&settings.output_dir, input);
    if pb.suspend(|| confirm_overwrite(&token_path, force))? {
        let token_file = encoded.to_token_file(raw)?;
        token_file.save(&token_path)?;
        log::info!(
            "Wrote {} tokens to {}",
            token_file.tokens.len(),
            token_path.display()
        );
    }

    if let Some(name) = render {
        let render_path = settings.output_dir.join(name);
        if pb.suspend(|| confirm_overwrite(&render_path, force))? {
            render_tokens(&encoded.tokens, encoded.resolution, &render_path)?;
        }
    }
    Ok(())
}

fn run_decode(
    input: &Path,
    output: &str,
    ticks_per_beat: Option<u32>,
    subdivision: Option<u32>,
    settings: &Settings,
    force: bool,
) -> Result<()> {
    validate_output_name(output).map_err(Error::InvalidArgument)?;

    let loaded = load_tokens(input)?;
    let (file_tpb, file_sub) = loaded
        .resolution
        .unwrap_or((DEFAULT_TICKS_PER_BEAT, settings.subdivision));
    let resolution = Resolution::new(
        ticks_per_beat.unwrap_or(file_tpb),
        subdivision.unwrap_or(file_sub),
    )?;

    let messages = decode_tokens(&loaded.tokens, resolution)?;
    let path = settings.output_dir.join(output);
    if !confirm_overwrite(&path, force)? {
        return Ok(());
    }
    write_track_with_length(
        &messages,
        resolution.ticks_per_beat(),
        resolution.grid_length(loaded.tokens.len()),
        &path,
    )?;

    log::info!(
        "Decoded {} tokens into {} messages at {}",
        loaded.tokens.len(),
        messages.len(),
        path.display()
    );
    println!("Wrote {}", path.display());
    Ok(())
}

fn run_inspect(input: &Path, settings: &Settings) -> Result<()> {
    let file = MidiFile::load(input)?;
    let selector = TrackSelector::new(&settings.track)?;
    let resolution = Resolution::new(file.ticks_per_beat, settings.subdivision)?;

    println!("File:           {}", input.display());
    println!("Ticks per beat: {}", file.ticks_per_beat);
    println!("Key signature:  {}", file.key.as_deref().unwrap_or("unknown"));
    println!(
        "Grid:           {} steps per beat, {} ticks per step",
        resolution.subdivision(),
        resolution.step_size()
    );
    println!("Tracks:");
    for (i, track) in file.tracks.iter().enumerate() {
        let marker = if selector.matches(track) { "*" } else { " " };
        println!(
            "  {} {:>2}: {:<24} {} notes",
            marker,
            i,
            track.name.as_deref().unwrap_or("<unnamed>"),
            track.note_on_count()
        );
    }

    let selected = selector.select(&file);
    if selected.is_empty() {
        println!("No '{}' track found.", settings.track);
        return Ok(());
    }

    let tokens = encode_selected(&selected, resolution)?;
    let trimmed = trim_silence(&tokens, resolution.subdivision())?;
    println!(
        "Tokens:         {} ({} after trimming silence)",
        tokens.len(),
        trimmed.len()
    );
    let preview = &trimmed[..trimmed.len().min(PREVIEW_TOKENS)];
    println!(
        "Opening beats:  {}",
        format_tokens(preview, resolution.subdivision())
    );

    let onsets: Vec<_> = selected
        .iter()
        .flat_map(|t| inter_onset_notes(&t.messages))
        .collect();
    let buckets = bucket_durations(&onsets, resolution.step_size(), ONSET_BUCKETS);
    println!("Inter-onset durations (ticks):");
    println!(
        "{}",
        format_histogram(&bucket_histogram(&buckets, ONSET_BUCKETS), resolution.step_size())
    );
    Ok(())
}
