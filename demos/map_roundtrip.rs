//! Convert a `.map` file to `.vmf`, then read that back and write it out as
//! a Valve 220 `.map`.
//!
//! `cargo run --example map_roundtrip -- in.map out.vmf out.map`
//! (set `RUST_LOG=debug` to see what each stage did)

use map_util::map::MapFile;
use map_util::qmap::{self, Dialect};
use map_util::vmf::Vmf;
use map_util::Writes;
use std::env::args;
use std::error::Error;
use std::fs::File;
use std::io;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let mut arguments = args();
    arguments.next();

    let map_path = arguments.next().ok_or("No input path")?;
    let vmf_path = arguments.next().ok_or("No VMF output path")?;
    let back_path = arguments.next().ok_or("No map output path")?;

    let reader = io::BufReader::new(File::open(&map_path)?);
    let map = qmap::parse_named(reader, &map_path)?;
    log::info!(
        "{}: {} entities, {} brushes",
        map_path,
        map.entities.len(),
        map.brush_count()
    );

    let mut vmf = Vmf::from(map);
    vmf.rebuild_nodes()?;

    let mut writer = io::BufWriter::new(File::create(&vmf_path)?);
    vmf.write_to(&mut writer)?;
    drop(writer);

    let reader = io::BufReader::new(File::open(&vmf_path)?);
    let reloaded = Vmf::parse_named(reader, &vmf_path)?;
    let map = MapFile::from(reloaded);

    let mut writer = io::BufWriter::new(File::create(&back_path)?);
    qmap::write(&map, Dialect::Valve220, &mut writer)?;

    log::info!("Wrote {} and {}", vmf_path, back_path);
    Ok(())
}
