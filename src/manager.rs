use crate::analysis::Analyzer;
use crate::config::Config;
use crate::data::Table;
use crate::plot::{PlotConfig, plot_all};
use crate::report::{save_json, write_results, write_table};
use anyhow::{Context, Result};
use glob::glob;
use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

pub struct Manager {
    out_dir: PathBuf,
    cfg: Config,
}

impl Manager {
    pub fn new<P: AsRef<Path>>(out_dir: P, config_file: Option<&Path>) -> Result<Self> {
        let out_dir = out_dir.as_ref().to_path_buf();

        let cfg = match config_file {
            Some(config_file) => {
                Config::from_file(config_file).context("failed to construct cfg")?
            }
            None => Config::default(),
        };
        log::info!("{cfg:#?}");

        fs::create_dir_all(&out_dir).with_context(|| format!("failed to create {out_dir:?}"))?;

        Ok(Self { out_dir, cfg })
    }

    pub fn run_analysis<P: AsRef<Path>>(&self, input_file: P) -> Result<()> {
        let input_file = input_file.as_ref();
        let table = Table::from_path(input_file, &self.cfg.input).context("failed to read table")?;
        log::info!("read {} rows from {input_file:?}", table.len());

        let mut stdout = io::stdout().lock();
        write_table(&mut stdout, &table).context("failed to write table")?;

        let report = Analyzer::new(&table)
            .analyze()
            .context("failed to analyze table")?;

        write_results(&mut stdout, &report).context("failed to write results")?;
        stdout.flush().context("failed to flush stdout")?;

        let results_file = self.results_file();
        save_json(&results_file, &table, &report).context("failed to save results")?;
        log::info!("saved {results_file:?}");

        if self.cfg.output.plots {
            let plot_cfg = PlotConfig::from(&self.cfg.output);
            let plot_files =
                plot_all(&self.out_dir, &table, &report, &plot_cfg).context("failed to plot fits")?;
            for plot_file in plot_files {
                log::info!("saved {plot_file:?}");
            }
        }

        Ok(())
    }

    pub fn clean_outputs(&self) -> Result<()> {
        let mut files = self.plot_files().context("failed to collect plot files")?;
        let results_file = self.results_file();
        if results_file.is_file() {
            files.push(results_file);
        }

        for file in files {
            fs::remove_file(&file).with_context(|| format!("failed to remove {file:?}"))?;
            log::info!("removed {file:?}");
        }

        Ok(())
    }

    fn plot_files(&self) -> Result<Vec<PathBuf>> {
        let pattern = self.out_dir.join("order-*.svg");
        let pattern = pattern.to_str().context("pattern is not valid UTF-8")?;
        let files = glob(pattern)
            .context("failed to glob plot files")?
            .filter_map(Result::ok)
            .filter(|p| p.is_file())
            .collect();
        Ok(files)
    }

    fn results_file(&self) -> PathBuf {
        self.out_dir.join("results.json")
    }
}
