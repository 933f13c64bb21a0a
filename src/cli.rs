use std::path::PathBuf;

use clap::Parser;

/// Step through the JPEG files of a folder and blur regions in place.
///
/// Drag a rectangle to blur it. Space saves and moves on, S saves, R reloads
/// the current file, N/P or the arrow keys skip without saving, Esc quits.
#[derive(Parser, Debug, Default)]
#[command(name = "blurry", version)]
pub struct CliArgs {
    /// Folder to open. A folder dialog is shown when omitted.
    #[arg(value_name = "FOLDER")]
    pub folder: Option<PathBuf>,

    /// JPEG quality used when saving (1-100). Overrides config.json.
    #[arg(long, value_name = "1-100", value_parser = clap::value_parser!(u8).range(1..=100))]
    pub jpeg_quality: Option<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_optional_folder_and_quality() {
        let args = CliArgs::try_parse_from(["blurry", "/srv/photos", "--jpeg-quality", "85"])
            .expect("valid arguments");
        assert_eq!(args.folder, Some(PathBuf::from("/srv/photos")));
        assert_eq!(args.jpeg_quality, Some(85));

        let bare = CliArgs::try_parse_from(["blurry"]).expect("no arguments");
        assert_eq!(bare.folder, None);
        assert_eq!(bare.jpeg_quality, None);
    }

    #[test]
    fn rejects_out_of_range_quality() {
        assert!(CliArgs::try_parse_from(["blurry", "--jpeg-quality", "0"]).is_err());
        assert!(CliArgs::try_parse_from(["blurry", "--jpeg-quality", "101"]).is_err());
    }
}
