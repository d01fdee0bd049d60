//! Tests for command-line parsing and batch file processing

#[cfg(test)]
mod tests {
    use clap::Parser;
    use image::RgbaImage;
    use overlapwfc::io::cli::{Cli, FileProcessor, output_path_for};
    use overlapwfc::io::configuration::{DEFAULT_SEED, PATTERN_SIZE};
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    fn quiet_cli(target: &Path, extra: &[&str]) -> Cli {
        let mut args = vec![
            "program".to_string(),
            target.to_string_lossy().to_string(),
            "--quiet".to_string(),
        ];
        args.extend(extra.iter().map(ToString::to_string));
        Cli::parse_from(args)
    }

    // Two-color vertical stripes, one pixel wide
    fn write_stripes(path: &Path) {
        let img = RgbaImage::from_fn(4, 4, |x, _| {
            if x % 2 == 0 {
                image::Rgba([255, 0, 0, 255])
            } else {
                image::Rgba([0, 0, 255, 255])
            }
        });
        img.save(path).expect("Failed to write exemplar");
    }

    // Tests CLI parsing with only the required target argument
    // Verified by changing default values to ensure defaults are used
    #[test]
    fn test_cli_parse_minimal_args() {
        let cli = Cli::parse_from(["program", "test.png"]);

        assert_eq!(cli.target, PathBuf::from("test.png"));
        assert_eq!(cli.seed, DEFAULT_SEED);
        assert_eq!((cli.width, cli.height), (32, 32));
        assert_eq!(cli.pattern_size, PATTERN_SIZE);
        assert!(!cli.symmetry);
        assert!(!cli.quiet);
        assert!(!cli.debug);
    }

    // Tests short and long flags map onto generation arguments
    // Verified by dropping a field from generation_args
    #[test]
    fn test_cli_parse_all_args() {
        let cli = Cli::parse_from([
            "program",
            "input.png",
            "-w",
            "48",
            "-H",
            "24",
            "-s",
            "7",
            "-n",
            "2",
            "-r",
            "--crop-x",
            "1",
            "--crop-y",
            "2",
            "-d",
        ]);
        let args = cli.generation_args();

        assert_eq!((args.width, args.height), (48, 24));
        assert_eq!(args.seed, 7);
        assert_eq!(args.pattern_size, 2);
        assert!(args.use_symmetry);
        assert_eq!((args.crop_x, args.crop_y), (1, 2));
        assert!(args.debug);
    }

    // Tests skip and progress switches
    // Verified by inverting the boolean logic
    #[test]
    fn test_cli_switches() {
        let default = Cli::parse_from(["program", "test.png"]);
        assert!(default.skip_existing());
        assert!(default.should_show_progress());

        let custom = Cli::parse_from(["program", "test.png", "--no-skip", "-q"]);
        assert!(!custom.skip_existing());
        assert!(!custom.should_show_progress());
    }

    // Tests output names carry the suffix and stay next to the input
    // Verified by changing the output suffix
    #[test]
    fn test_output_path_for() {
        assert_eq!(
            output_path_for(Path::new("dir/brick.png")),
            PathBuf::from("dir/brick_result.png")
        );
        assert_eq!(
            output_path_for(Path::new("brick.png")),
            PathBuf::from("brick_result.png")
        );
    }

    // Tests a missing target is rejected
    // Verified by returning an empty file list for missing paths
    #[test]
    fn test_process_nonexistent_target() {
        let mut processor = FileProcessor::new(quiet_cli(Path::new("nonexistent.png"), &[]));
        assert!(processor.process().is_err());
    }

    // Tests non-PNG targets are rejected
    // Verified by removing the extension check
    #[test]
    fn test_process_invalid_file_type() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let txt_file = temp_dir.path().join("test.txt");
        fs::write(&txt_file, "not a png").expect("Failed to write file");

        let mut processor = FileProcessor::new(quiet_cli(&txt_file, &[]));
        assert!(processor.process().is_err());
    }

    // Tests an existing output causes the input to be skipped without decoding it
    // Verified by removing the skip check
    #[test]
    fn test_skip_existing_output() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let input = temp_dir.path().join("test.png");
        fs::write(&input, "fake png").expect("Failed to write file");
        fs::write(temp_dir.path().join("test_result.png"), "output").expect("Failed to write file");

        let mut processor = FileProcessor::new(quiet_cli(&input, &[]));
        assert!(processor.process().is_ok());

        let mut forced = FileProcessor::new(quiet_cli(&input, &["--no-skip"]));
        assert!(forced.process().is_err());
    }

    // Tests an empty directory is not an error
    // Verified by adding an error for empty directories
    #[test]
    fn test_process_empty_directory() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let mut processor = FileProcessor::new(quiet_cli(temp_dir.path(), &[]));
        assert!(processor.process().is_ok());
    }

    // Tests a real exemplar is synthesized and written at the requested size
    // Verified by exporting before the run finished
    #[test]
    fn test_process_single_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let input = temp_dir.path().join("stripes.png");
        write_stripes(&input);

        let cli = quiet_cli(&input, &["-w", "6", "-H", "5", "-n", "2"]);
        FileProcessor::new(cli)
            .process()
            .expect("Processing should succeed");

        let output = image::open(temp_dir.path().join("stripes_result.png"))
            .expect("Output should be readable")
            .to_rgba8();
        assert_eq!(output.dimensions(), (6, 5));
        for y in 0..5 {
            for x in 0..5 {
                assert_ne!(output.get_pixel(x, y), output.get_pixel(x + 1, y));
            }
        }
    }

    // Tests directory mode processes inputs but never previous outputs
    // Verified by removing the output suffix filter
    #[test]
    fn test_process_directory_ignores_outputs() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        write_stripes(&temp_dir.path().join("a.png"));
        write_stripes(&temp_dir.path().join("b.png"));
        write_stripes(&temp_dir.path().join("c_result.png"));

        let cli = quiet_cli(temp_dir.path(), &["-w", "4", "-H", "4", "-n", "2"]);
        FileProcessor::new(cli)
            .process()
            .expect("Processing should succeed");

        assert!(temp_dir.path().join("a_result.png").exists());
        assert!(temp_dir.path().join("b_result.png").exists());
        assert!(!temp_dir.path().join("c_result_result.png").exists());
    }
}
