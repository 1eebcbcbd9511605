use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, LineWriter, Write};

use log::info;
use seg_split::{Configuration, SplitConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    // simple command line interface
    let args: Vec<_> = std::env::args().collect();
    if args.len() != 4 {
        eprintln!("usage: verifier <config.yml> <input> <output>");
        std::process::exit(2);
    }
    let cfg = SplitConfig::from_file(&args[1])?;
    let segmenter = cfg.segmenter()?;
    let input_file = File::open(&args[2])?;
    let lines = io::BufReader::new(input_file).lines();

    let mut opts = OpenOptions::new();
    opts.create(true).write(true).truncate(true);
    let output_file = opts.open(&args[3])?;
    let mut writer = LineWriter::new(output_file);

    let mut total = 0_usize;
    for line in lines {
        let line = line?;
        let segments: Vec<&str> = segmenter
            .segments(&line)
            .filter(|s| !(cfg.skip_empty() && s.is_empty()))
            .collect();
        writer.write_all(segments.join("|").as_bytes())?;
        writer.write_all(b"\n")?;
        total += 1;
    }
    writer.flush()?;
    info!("split {} lines with separator {:?}", total, cfg.separator());
    Ok(())
}
