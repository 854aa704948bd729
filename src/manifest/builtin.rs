//! The built-in manifest: splits the combined Minecraft atlases of older
//! resource packs into the one-file-per-sprite layout of newer versions.

use super::{
    layout::{fixed, Grid, REF_128, REF_256},
    Manifest, ManifestError,
};
use crate::slicer::{InputSpec, OutputSpec, RegionError, Transform};

const TEXTURES: &str = "assets/minecraft/textures";

/// name, column, row, width, height (16px cells)
const PAINTINGS: &[(&str, u32, u32, u32, u32)] = &[
    ("back", 15, 0, 1, 1),
    ("kebab", 0, 0, 1, 1),
    ("aztec", 1, 0, 1, 1),
    ("alban", 2, 0, 1, 1),
    ("aztec2", 3, 0, 1, 1),
    ("bomb", 4, 0, 1, 1),
    ("plant", 5, 0, 1, 1),
    ("wasteland", 6, 0, 1, 1),
    ("pool", 0, 2, 2, 1),
    ("courbet", 2, 2, 2, 1),
    ("sea", 4, 2, 2, 1),
    ("sunset", 6, 2, 2, 1),
    ("creebet", 8, 2, 2, 1),
    ("wanderer", 0, 4, 1, 2),
    ("graham", 1, 4, 1, 2),
    ("match", 0, 8, 2, 2),
    ("bust", 2, 8, 2, 2),
    ("stage", 4, 8, 2, 2),
    ("void", 6, 8, 2, 2),
    ("skull_and_roses", 8, 8, 2, 2),
    ("wither", 10, 8, 2, 2),
    ("fighters", 0, 6, 4, 2),
    ("pointer", 0, 12, 4, 4),
    ("pigscene", 4, 12, 4, 4),
    ("burning_skull", 8, 12, 4, 4),
    ("skeleton", 12, 4, 4, 3),
    ("donkey_kong", 12, 7, 4, 3),
];

/// name, column, row (18px cells below the inventory panel)
const EFFECTS: &[(&str, u32, u32)] = &[
    ("speed", 0, 0),
    ("slowness", 1, 0),
    ("haste", 2, 0),
    ("mining_fatigue", 3, 0),
    ("strength", 4, 0),
    ("jump_boost", 2, 1),
    ("nausea", 3, 1),
    ("regeneration", 7, 0),
    ("resistance", 6, 1),
    ("fire_resistance", 7, 1),
    ("water_breathing", 0, 2),
    ("invisibility", 0, 1),
    ("blindness", 5, 1),
    ("night_vision", 4, 1),
    ("hunger", 1, 1),
    ("weakness", 5, 0),
    ("poison", 6, 0),
    ("wither", 1, 2),
    ("health_boost", 7, 2),
    ("absorption", 2, 2),
    ("glowing", 4, 2),
    ("levitation", 3, 2),
    ("luck", 5, 2),
    ("unluck", 6, 2),
    ("slow_falling", 8, 0),
    ("conduit_power", 9, 0),
    ("dolphins_grace", 10, 0),
];

/// Animated particles laid out as a row of eight frames: name, row.
const PARTICLE_ROWS: &[(&str, u32)] = &[
    ("generic", 0),
    ("effect", 8),
    ("spell", 9),
    ("spark", 10),
    ("glitter", 11),
];

/// name, column, row, width, height (8px cells)
const PARTICLES: &[(&str, u32, u32, u32, u32)] = &[
    ("splash_0", 3, 1, 1, 1),
    ("splash_1", 4, 1, 1, 1),
    ("splash_2", 5, 1, 1, 1),
    ("splash_3", 6, 1, 1, 1),
    ("flash", 4, 2, 4, 4),
    ("nautilus", 0, 13, 1, 1),
    ("note", 0, 4, 1, 1),
    ("angry", 1, 5, 1, 1),
    ("bubble", 0, 2, 1, 1),
    ("damage", 3, 4, 1, 1),
    ("flame", 0, 3, 1, 1),
    ("lava", 1, 3, 1, 1),
    ("heart", 0, 5, 1, 1),
    ("glint", 2, 5, 1, 1),
    ("enchanted_hit", 2, 4, 1, 1),
    ("critical_hit", 1, 4, 1, 1),
    ("drip_hang", 0, 7, 1, 1),
    ("drip_fall", 1, 7, 1, 1),
    ("drip_land", 2, 7, 1, 1),
];

fn painting(name: &str) -> String {
    format!("{TEXTURES}/painting/{name}.png")
}

fn effect(name: &str) -> String {
    format!("{TEXTURES}/mob_effect/{name}.png")
}

fn particle(name: &str) -> String {
    format!("{TEXTURES}/particle/{name}.png")
}

/// Build the built-in manifest. Fails only if a declaration above is broken.
pub fn minecraft() -> Result<Manifest, ManifestError> {
    let manifest = Manifest::new()
        .input(paintings()?)
        .input(effects()?)
        .input(particles()?)
        .input(explosion()?)
        .input(sweep()?);

    manifest.validate()?;
    Ok(manifest)
}

fn paintings() -> Result<InputSpec, RegionError> {
    let grid = Grid::new(16, 16, REF_256);

    let outputs = PAINTINGS
        .iter()
        .map(|&(name, x, y, w, h)| Ok(OutputSpec::new(painting(name), grid.span(x, y, w, h)?)))
        .collect::<Result<Vec<_>, RegionError>>()?;

    Ok(
        InputSpec::new(format!("{TEXTURES}/painting/paintings_kristoffer_zetterstrand.png"))
            .outputs(outputs),
    )
}

fn effects() -> Result<InputSpec, RegionError> {
    let grid = Grid::new(18, 18, REF_256).with_offset(0, 198);

    let outputs = EFFECTS
        .iter()
        .map(|&(name, x, y)| Ok(OutputSpec::new(effect(name), grid.cell(x, y)?)))
        .collect::<Result<Vec<_>, RegionError>>()?;

    Ok(InputSpec::new(format!("{TEXTURES}/gui/container/inventory.png")).outputs(outputs))
}

fn particles() -> Result<InputSpec, RegionError> {
    let grid = Grid::new(8, 8, REF_256);
    let mut outputs = Vec::new();

    for &(name, row) in PARTICLE_ROWS {
        for frame in 0..8 {
            outputs.push(OutputSpec::new(
                particle(&format!("{name}_{frame}")),
                grid.cell(frame, row)?,
            ));
        }
    }

    for &(name, x, y, w, h) in PARTICLES {
        outputs.push(OutputSpec::new(particle(name), grid.span(x, y, w, h)?));
    }

    // standard galactic alphabet, wrapping from row 14 into row 15
    for (idx, letter) in ('a'..='z').enumerate() {
        let idx = idx as u32 + 1;
        outputs.push(OutputSpec::new(
            particle(&format!("sga_{letter}")),
            grid.cell(idx % 16, 14 + idx / 16)?,
        ));
    }

    // bubble pop frames are 16px wide and sit 3px below row 16
    let bubble_pop = grid.with_offset(0, 3);
    for frame in 0..5 {
        outputs.push(OutputSpec::new(
            particle(&format!("bubble_pop_{frame}")),
            bubble_pop.span(frame * 2, 16, 2, 2)?,
        ));
    }

    Ok(InputSpec::new(format!("{TEXTURES}/particle/particles.png"))
        .outputs(outputs)
        .output(OutputSpec::new(
            format!("{TEXTURES}/entity/fishing_hook.png"),
            fixed(REF_256, 8, 16, 8, 8)?,
        )))
}

fn explosion() -> Result<InputSpec, RegionError> {
    let grid = Grid::new(32, 32, REF_128);
    let mut outputs = Vec::new();

    for frame in 0..16 {
        outputs.push(OutputSpec::new(
            particle(&format!("explosion_{frame}")),
            grid.cell(frame % 4, frame / 4)?,
        ));
    }

    Ok(InputSpec::new(format!("{TEXTURES}/entity/explosion.png")).outputs(outputs))
}

fn sweep() -> Result<InputSpec, RegionError> {
    let grid = Grid::new(32, 16, (128, 32));
    let mut outputs = Vec::new();

    for frame in 0..8 {
        outputs.push(
            OutputSpec::new(
                particle(&format!("sweep_{frame}")),
                grid.cell(frame % 4, frame / 4)?,
            )
            .apply(Transform::Square),
        );
    }

    Ok(InputSpec::new(format!("{TEXTURES}/entity/sweep.png")).outputs(outputs))
}
