//! Command-line interface of the `gyral-zones` binary.

use std::path::PathBuf;

use clap::Parser;
use log::LevelFilter;

use crate::config::Config;


const ABOUT: &str = "Create masks for gyral crowns, sulcal walls and sulcal fundi from a FreeSurfer ?h.curv file.

If an annot file is given, the masks are also computed within each region of interest.
If an annot file and a metric are given, the mean and standard deviation of the metric
(e.g. DWI data resampled onto the white surface with mri_vol2surf) are computed for the
crown, wall and fundus of every region and written to a CSV table.";


/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "gyral-zones", version, about = "Split a brain surface into gyral crown, sulcal wall and sulcal fundus zones", long_about = ABOUT)]
pub struct Cli {
    /// Path to curvature file. Must be 1 hemisphere only (e.g. ~/brains/s01/surf/lh.curv).
    #[arg(short = 'c', long = "curv")]
    pub curv: PathBuf,

    /// Path to aparc annot file (cortical regions). Must be the same hemisphere (e.g. ~/brains/s01/label/lh.aparc.annot).
    #[arg(short = 'a', long = "annot")]
    pub annot: Option<PathBuf>,

    /// MGH or MGZ file containing the metric to average across crowns, walls and fundi within each region.
    #[arg(short = 'm', long = "metric")]
    pub metric: Option<PathBuf>,

    /// Regions to use, separated by spaces or commas. Defaults to 15 regions of the Desikan-Killiani atlas.
    #[arg(short = 'r', long = "rois", num_args = 1.., value_delimiter = ',')]
    pub rois: Option<Vec<String>>,

    /// Where to save the mean and SD of crowns, walls and fundi for the metric. Defaults to the metric's folder.
    #[arg(short = 'o', long = "output_csv")]
    pub output_csv: Option<PathBuf>,

    /// Save the raw per-vertex data (curvature, zone, region, metric) as a CSV file at this path.
    #[arg(short = 's', long = "save_data")]
    pub save_data: Option<PathBuf>,

    /// Do not render the curvature histogram and the metric scatter plot.
    #[arg(long = "no_plots")]
    pub no_plots: bool,

    /// Also write a combined crown/wall/fundus label file for every region.
    #[arg(long = "region_labels")]
    pub region_labels: bool,

    /// Print more output. Repeat for even more.
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Only print warnings and errors.
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,
}

impl Cli {
    pub fn log_level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::Warn;
        }
        match self.verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Config {
        Config {
            curv_file: cli.curv,
            annot_file: cli.annot,
            metric_file: cli.metric,
            regions: cli.rois,
            output_csv: cli.output_csv,
            save_data: cli.save_data,
            plots: !cli.no_plots,
            region_labels: cli.region_labels,
        }
    }
}


#[cfg(test)]
mod test {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn the_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn only_the_curvature_file_is_required() {
        let cli = Cli::try_parse_from(["gyral-zones", "--curv", "lh.curv"]).unwrap();
        assert_eq!(LevelFilter::Info, cli.log_level());

        let config = Config::from(cli);
        assert_eq!(Config::new("lh.curv"), config);

        assert!(Cli::try_parse_from(["gyral-zones"]).is_err());
    }

    #[test]
    fn regions_accept_spaces_and_commas() {
        let cli = Cli::try_parse_from(["gyral-zones", "-c", "lh.curv", "--rois", "cuneus,precuneus", "fusiform"]).unwrap();
        assert_eq!(Some(vec!["cuneus".to_string(), "precuneus".to_string(), "fusiform".to_string()]), cli.rois);
    }

    #[test]
    fn all_flags_reach_the_config() {
        let cli = Cli::try_parse_from([
            "gyral-zones", "-c", "lh.curv", "-a", "lh.aparc.annot", "-m", "lh.fa.mgh",
            "--output_csv", "out.csv", "--save_data", "raw.csv", "--no_plots", "--region_labels", "-vv",
        ]).unwrap();
        assert_eq!(LevelFilter::Trace, cli.log_level());

        let config = Config::from(cli);
        assert_eq!(Some(PathBuf::from("lh.aparc.annot")), config.annot_file);
        assert_eq!(Some(PathBuf::from("lh.fa.mgh")), config.metric_file);
        assert_eq!(Some(PathBuf::from("out.csv")), config.output_csv);
        assert_eq!(Some(PathBuf::from("raw.csv")), config.save_data);
        assert!(!config.plots);
        assert!(config.region_labels);
    }
}
