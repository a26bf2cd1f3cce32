//! Array command implementation.

use crate::utils::{format_size, read_input};
use clap::ValueEnum;
use oxifbx_zlib::{ArrayElement, ArrayEncoding, ArrayProperty};
use std::fmt::Display;
use std::path::Path;

/// Array element type code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ElementArg {
    /// 32-bit float
    #[value(name = "f")]
    F32,
    /// 64-bit float
    #[value(name = "d")]
    F64,
    /// 32-bit integer
    #[value(name = "i")]
    I32,
    /// 64-bit integer
    #[value(name = "l")]
    I64,
    /// Boolean byte
    #[value(name = "b")]
    Bool,
}

impl From<ElementArg> for ArrayElement {
    fn from(arg: ElementArg) -> Self {
        match arg {
            ElementArg::F32 => ArrayElement::F32,
            ElementArg::F64 => ArrayElement::F64,
            ElementArg::I32 => ArrayElement::I32,
            ElementArg::I64 => ArrayElement::I64,
            ElementArg::Bool => ArrayElement::Bool,
        }
    }
}

/// Options for decoding an array property.
pub struct ArrayOptions {
    pub element: Option<ElementArg>,
    pub count: Option<u32>,
    pub encoding: u32,
    pub record: bool,
    pub show: usize,
}

pub fn cmd_array(input: &Path, options: &ArrayOptions) -> Result<(), Box<dyn std::error::Error>> {
    let data = read_input(input)?;

    let property = if options.record {
        let (property, used) = ArrayProperty::parse(&data)?;
        if used < data.len() {
            println!("Note: {} bytes follow the property record", data.len() - used);
        }
        property
    } else {
        let (Some(element), Some(count)) = (options.element, options.count) else {
            return Err("--type and --count are required without --record".into());
        };
        ArrayProperty {
            element: element.into(),
            count,
            encoding: ArrayEncoding::from_u32(options.encoding)?,
            payload: &data,
        }
    };

    println!("Array: {}", input.display());
    println!("  Element: {:?} ('{}')", property.element, property.element.type_code() as char);
    println!("  Count: {}", property.count);
    println!("  Encoding: {:?}", property.encoding);
    println!(
        "  Payload: {} -> {}",
        format_size(property.payload.len()),
        format_size(property.expected_len()?)
    );

    match property.element {
        ArrayElement::F32 => summarize(&property.to_f32s()?, options.show),
        ArrayElement::F64 => summarize(&property.to_f64s()?, options.show),
        ArrayElement::I32 => summarize(&property.to_i32s()?, options.show),
        ArrayElement::I64 => summarize(&property.to_i64s()?, options.show),
        ArrayElement::Bool => {
            let values = property.to_bools()?;
            let set = values.iter().filter(|&&v| v).count();
            println!("  True: {} of {}", set, values.len());
            summarize(&values, options.show);
        }
    }

    Ok(())
}

fn summarize<T: Display + PartialOrd + Copy>(values: &[T], show: usize) {
    let shown: Vec<String> = values.iter().take(show).map(|v| v.to_string()).collect();
    let more = if values.len() > show { ", ..." } else { "" };
    println!("  Values: [{}{}]", shown.join(", "), more);

    let mut iter = values.iter().copied();
    if let Some(first) = iter.next() {
        let (min, max) = iter.fold((first, first), |(lo, hi), v| {
            (if v < lo { v } else { lo }, if v > hi { v } else { hi })
        });
        println!("  Range: {} ..= {}", min, max);
    }
}
