use std::io::Write;
use std::path::Path;

use image::ColorType;
use text_io::read;

pub enum Assume {
    Yes,
    No,
}

/// Sample layouts an MCI container can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorFormat {
    Gray8,
    Rgb8,
}

impl ColorFormat {
    pub fn channels(self) -> u32 {
        match self {
            ColorFormat::Gray8 => 1,
            ColorFormat::Rgb8 => 3,
        }
    }
}

pub fn color_format(s: &str) -> Result<ColorFormat, String> {
    if !s.is_ascii() {
        return Err(format!("Invalid color format {}", s));
    }

    let s_lower = s.to_lowercase();

    let color_format = match s_lower.as_str() {
        "gray8" => ColorFormat::Gray8,
        "rgb8" => ColorFormat::Rgb8,
        _ => return Err(format!("Invalid color format {}", s)),
    };

    Ok(color_format)
}

/// The widest stored layout that loses no information for an input
/// image's color type.
pub fn color_type_to_format(img_color_format: ColorType) -> Option<ColorFormat> {
    Some(match img_color_format {
        ColorType::L8 | ColorType::La8 => ColorFormat::Gray8,
        ColorType::Rgb8 | ColorType::Rgba8 => ColorFormat::Rgb8,
        _ => return None,
    })
}

pub fn channels_to_color_type(channels: u32) -> Option<ColorType> {
    Some(match channels {
        1 => ColorType::L8,
        3 => ColorType::Rgb8,
        _ => return None,
    })
}

pub fn exists_decision<P: AsRef<Path>>(
    place: &str,
    action: &str,
    path: &P,
    assume: Option<Assume>,
) -> bool {
    let path = path.as_ref();

    match assume {
        Some(Assume::Yes) => return true,
        Some(Assume::No) => return false,
        None => (),
    }

    loop {
        print!("{place} file {path:?} already exists. {action}? [y/N] ");
        let _ = std::io::stdout().flush();

        let opt: String = read!("{}\n");

        match opt.to_lowercase().as_str() {
            "y" | "yes" => return true,
            "" | "n" | "no" => return false,
            _ => continue,
        }
    }
}
