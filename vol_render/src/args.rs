//! Argument parsing and validation
//! Uses library `clap`

use std::ffi::OsStr;

use clap::{Arg, Command, ValueHint};

// up to 16bit value
pub fn is_positive_number(num: &str) -> Result<(), String> {
    match num.parse::<u16>() {
        Ok(n) if n > 0 => Ok(()),
        Ok(_) => Err("Number must be greater than 0".into()),
        Err(_) => Err("Number in range <1;65535> required".into()),
    }
}

pub fn is_float_number(num: &str) -> Result<(), String> {
    match num.parse::<f32>() {
        Ok(n) if n.is_finite() => Ok(()),
        _ => Err("Finite number required".into()),
    }
}

pub fn is_positive_float(num: &str) -> Result<(), String> {
    match num.parse::<f32>() {
        Ok(n) if n.is_finite() && n > 0.0 => Ok(()),
        Ok(_) => Err("Number must be greater than 0.0".into()),
        Err(_) => Err("Number required".into()),
    }
}

const COLOR_MODES: &[&str] = &["1", "2", "3"];

/// Comma separated triple, `--name=X,Y,Z`
fn vector3_arg<'a>(name: &'a str, help: &'a str, default: &'a [&'a str]) -> Arg<'a> {
    Arg::new(name)
        .help(help)
        .long(name)
        .number_of_values(3)
        .value_names(&["X", "Y", "Z"])
        .use_value_delimiter(true)
        .require_value_delimiter(true)
        .require_equals(true)
        .default_values(default)
        .validator(is_float_number)
}

pub fn get_command<'a>() -> Command<'a> {
    Command::new("Vol-render")
        .version("0.1.0")
        .about("Headless volume ray-marcher, renders raw 8-bit volumes to PNG")
        .arg(
            Arg::new("input")
                .help("Raw volume file, one byte per voxel, x fastest")
                .long("input")
                .short('i')
                .required(true)
                .value_name("FILE")
                .allow_invalid_utf8(true)
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("dims")
                .help("Dimensions of volume, guessed from file name or size if left out")
                .long("dims")
                .short('d')
                .number_of_values(3)
                .value_names(&["X", "Y", "Z"])
                .use_value_delimiter(true)
                .require_value_delimiter(true)
                .require_equals(true)
                .validator(is_positive_number),
        )
        .arg(
            Arg::new("resolution")
                .help("Output image size")
                .long("resolution")
                .short('r')
                .number_of_values(2)
                .value_names(&["W", "H"])
                .use_value_delimiter(true)
                .require_value_delimiter(true)
                .require_equals(true)
                .default_values(&["512", "512"])
                .validator(is_positive_number),
        )
        .arg(vector3_arg(
            "camera",
            "Camera position",
            &["0", "0", "-2"],
        ))
        .arg(vector3_arg(
            "target",
            "Point the camera looks at",
            &["0", "0", "0"],
        ))
        .arg(
            Arg::new("fov")
                .help("Vertical field of view in degrees")
                .long("fov")
                .value_name("DEG")
                .default_value("75")
                .validator(is_positive_float),
        )
        .arg(vector3_arg(
            "translate",
            "Volume translation",
            &["0", "0", "0"],
        ))
        .arg(vector3_arg(
            "rotate",
            "Volume rotation, Euler angles in degrees",
            &["0", "0", "0"],
        ))
        .arg(vector3_arg("scale", "Volume scale", &["1", "1", "1"]))
        .arg(vector3_arg(
            "cross-section",
            "Half extents of the rendered box",
            &["0.5", "0.5", "0.5"],
        ))
        .arg(
            Arg::new("step")
                .help("Ray marching step")
                .long("step")
                .value_name("STEP")
                .default_value("0.01")
                .validator(is_float_number),
        )
        .arg(
            Arg::new("color")
                .help("Color mode: 1 greyscale, 2 single hue, 3 palette")
                .long("color")
                .short('c')
                .value_name("MODE")
                .default_value("1")
                .possible_values(COLOR_MODES),
        )
        .arg(
            Arg::new("alpha")
                .help("Opacity scale of a single sample")
                .long("alpha")
                .short('a')
                .value_name("ALPHA")
                .default_value("0.1")
                .validator(is_float_number),
        )
        .arg(
            Arg::new("iso")
                .help("Iso value")
                .long("iso")
                .value_name("VALUE")
                .default_value("0")
                .validator(is_float_number),
        )
        .arg(
            Arg::new("no-termination")
                .help("Disable early ray termination")
                .long("no-termination"),
        )
        .arg(
            Arg::new("single-thread")
                .help("Render on a single thread")
                .long("single-thread"),
        )
        .arg(
            Arg::new("animate")
                .help("Render a slicing animation of given length instead of a single frame")
                .long("animate")
                .value_name("SECONDS")
                .validator(is_positive_float),
        )
        .arg(
            Arg::new("fps")
                .help("Frames per second of the animation")
                .long("fps")
                .value_name("N")
                .default_value("24")
                .validator(is_positive_number),
        )
        .arg(
            Arg::new("output")
                .help("Output PNG, animation frames get a frame number suffix")
                .long("output")
                .short('o')
                .value_name("FILE")
                .allow_invalid_utf8(true)
                .value_hint(ValueHint::FilePath)
                .default_value_os(OsStr::new("frame.png")),
        )
}
