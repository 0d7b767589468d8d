use std::str::FromStr;
use lazy_raster::{Raster, RasterError, Result};
use crate::preset::Preset;

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Op {
    Add(f64),
    Subtract(f64),
    Multiply(f64),
    Divide(f64),
    Modulo(f64),
    Clamp(f64, f64),
    Min(f64),
    MinCutOff(f64, f64),
    Max(f64),
    MaxCutOff(f64, f64),
    Normalize,
    Invert,
    Blur(usize),
    Edges(f64),
    Eval,
}

impl Op {
    pub fn apply(&self, raster: &Raster) -> Raster {
        match *self {
            Op::Add(v) => raster.add(v),
            Op::Subtract(v) => raster.subtract(v),
            Op::Multiply(v) => raster.multiply(v),
            Op::Divide(v) => raster.divide(v),
            Op::Modulo(v) => raster.modulo(v),
            Op::Clamp(min, max) => raster.clamp(min, max),
            Op::Min(v) => raster.min_with(v),
            Op::MinCutOff(v, cut_off) => raster.min_cut_off(v, cut_off),
            Op::Max(v) => raster.max_with(v),
            Op::MaxCutOff(v, cut_off) => raster.max_cut_off(v, cut_off),
            Op::Normalize => raster.normalize(),
            Op::Invert => raster.invert(),
            Op::Blur(radius) => raster.gaussian_blur(radius),
            Op::Edges(threshold) => raster.edges(threshold),
            Op::Eval => raster.evaluate(),
        }
    }
}

fn invalid(message: String) -> RasterError {
    RasterError::InvalidArgument(message)
}

fn values<T: FromStr>(command: &str, value: Option<&str>) -> Result<Vec<T>> {
    value.ok_or_else(|| invalid(format!("Expected a value for {command}")))?
        .split(',')
        .map(|x| x.trim()
            .parse()
            .map_err(|_| invalid(format!("Invalid value '{x}' for {command}"))))
        .collect()
}

fn single<T: FromStr + Copy>(command: &str, value: Option<&str>) -> Result<T> {
    match values(command, value)?.as_slice() {
        [v] => Ok(*v),
        _ => Err(invalid(format!("Expected one value for {command}"))),
    }
}

fn flag(command: &str, value: Option<&str>, op: Op) -> Result<Op> {
    match value {
        None => Ok(op),
        Some(_) => Err(invalid(format!("{command} takes no value"))),
    }
}

impl FromStr for Op {
    type Err = RasterError;

    fn from_str(s: &str) -> Result<Op> {
        let mut opt = s.splitn(2, '=');
        let command = opt.next().unwrap_or_default();
        let value = opt.next();
        match command {
            "--add" => single(command, value).map(Op::Add),
            "--subtract" => single(command, value).map(Op::Subtract),
            "--multiply" => single(command, value).map(Op::Multiply),
            "--divide" => single(command, value).map(Op::Divide),
            "--mod" => single(command, value).map(Op::Modulo),
            "--clamp" => match values(command, value)?.as_slice() {
                [min, max] => Ok(Op::Clamp(*min, *max)),
                _ => Err(invalid(format!("Expected min,max for {command}"))),
            },
            "--min" => match values(command, value)?.as_slice() {
                [v] => Ok(Op::Min(*v)),
                [v, cut_off] => Ok(Op::MinCutOff(*v, *cut_off)),
                _ => Err(invalid(format!("Expected value[,cutoff] for {command}"))),
            },
            "--max" => match values(command, value)?.as_slice() {
                [v] => Ok(Op::Max(*v)),
                [v, cut_off] => Ok(Op::MaxCutOff(*v, *cut_off)),
                _ => Err(invalid(format!("Expected value[,cutoff] for {command}"))),
            },
            "--blur" => single(command, value).map(Op::Blur),
            "--edges" => single(command, value).map(Op::Edges),
            "--normalize" => flag(command, value, Op::Normalize),
            "--invert" => flag(command, value, Op::Invert),
            "--eval" => flag(command, value, Op::Eval),
            unknown => Err(invalid(format!("Unexpected option '{unknown}'"))),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Options {
    pub source: String,
    pub destination: String,
    pub lightness: bool,
    pub preset: Option<Preset>,
    pub ops: Vec<Op>,
}

impl Options {
    pub fn parse(args: impl IntoIterator<Item = String>) -> Result<Options> {
        let mut args = args.into_iter();
        let source = args.next()
            .ok_or_else(|| invalid("Expected source image".to_string()))?;
        let destination = args.next()
            .ok_or_else(|| invalid("Expected destination image".to_string()))?;

        let mut options = Options {
            source,
            destination,
            lightness: false,
            preset: None,
            ops: Vec::new(),
        };
        for arg in args {
            if arg == "--lightness" {
                options.lightness = true;
            } else if let Some(name) = arg.strip_prefix("--preset=") {
                options.preset = Some(name.parse()?);
            } else {
                options.ops.push(arg.parse()?);
            }
        }
        Ok(options)
    }

    pub fn apply(&self, raster: &Raster) -> Raster {
        self.ops.iter()
            .fold(raster.clone(), |raster, op| op.apply(&raster))
    }
}

#[cfg(test)]
mod tests {
    use lazy_raster::{Grid, Source};
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_operations_in_order() {
        let options = Options::parse(args(&[
            "in.png", "out.png", "--lightness", "--min=200,0", "--blur=20", "--normalize", "--clamp=0,255",
        ])).unwrap();
        assert_eq!(options.source, "in.png");
        assert_eq!(options.destination, "out.png");
        assert!(options.lightness);
        assert_eq!(options.ops, vec![
            Op::MinCutOff(200.0, 0.0),
            Op::Blur(20),
            Op::Normalize,
            Op::Clamp(0.0, 255.0),
        ]);
    }

    #[test]
    fn parses_presets() {
        let options = Options::parse(args(&["a", "b", "--preset=outline"])).unwrap();
        assert_eq!(options.preset, Some(Preset::Outline));
        assert!(Options::parse(args(&["a", "b", "--preset=sepia"])).is_err());
    }

    #[test]
    fn rejects_malformed_options() {
        assert!(Options::parse(args(&["only-source"])).is_err());
        for bad in ["--add", "--add=x", "--clamp=1", "--min=1,2,3", "--blur=-1", "--invert=1", "--sharpen=2"] {
            let result = Options::parse(args(&["a", "b", bad]));
            assert!(matches!(result, Err(RasterError::InvalidArgument(_))), "{bad} accepted");
        }
    }

    #[test]
    fn applies_operations() {
        let raster = Raster::new(Grid::new(2, 1, vec![10.0, 30.0]));
        let options = Options::parse(args(&["a", "b", "--subtract=10", "--normalize", "--invert"])).unwrap();
        let result = options.apply(&raster).evaluate();
        assert_eq!((result.get(0), result.get(1)), (1.0, 0.0));
    }
}
