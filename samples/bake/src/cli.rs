use std::path::PathBuf;

use clap::ValueHint;
use nalgebra::{Scalar, Scale3, Vector3};
use stripbake::{Config, Winding};

use std::str::FromStr;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, clap::ValueEnum)]
pub enum LogFormat {
    Compact,
    Full,
    Pretty,
    Json,
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogFormat::Compact => f.write_str("compact"),
            LogFormat::Full => f.write_str("full"),
            LogFormat::Pretty => f.write_str("pretty"),
            LogFormat::Json => f.write_str("json"),
        }
    }
}

/// Front face winding expected by the renderer
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, clap::ValueEnum)]
pub enum WindingArg {
    Clockwise,
    CounterClockwise,
}

impl std::fmt::Display for WindingArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&Winding::from(*self), f)
    }
}

impl From<WindingArg> for Winding {
    fn from(arg: WindingArg) -> Self {
        match arg {
            WindingArg::Clockwise => Winding::Clockwise,
            WindingArg::CounterClockwise => Winding::CounterClockwise,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ArgError {
    #[error("expected 3 comma-separated components; found {0}")]
    ComponentCount(usize),
    #[error("missing file path")]
    MissingPath,
    #[error("expected at most FILE,STRIP,INSTANCE")]
    TrailingLodField,
    #[error(transparent)]
    Int(#[from] std::num::ParseIntError),
}

/// One level of detail: an OBJ file and the bake parameters for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LodSpec {
    pub path: PathBuf,
    pub max_strip_length: usize,
    pub max_instance_vertices: usize,
}

impl LodSpec {
    pub fn config(&self, winding: Winding) -> Config {
        Config::new(self.max_strip_length, self.max_instance_vertices).with_winding(winding)
    }
}

/// `FILE[,STRIP[,INSTANCE]]`; omitted numbers take their [Config::default] values.
impl FromStr for LodSpec {
    type Err = ArgError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let defaults = Config::default();
        let mut split = s.trim().split(',');
        let path = match split.next() {
            Some(p) if !p.is_empty() => PathBuf::from(p),
            _ => return Err(ArgError::MissingPath),
        };
        let max_strip_length = match split.next() {
            Some(n) => n.trim().parse()?,
            None => defaults.max_strip_length,
        };
        let max_instance_vertices = match split.next() {
            Some(n) => n.trim().parse()?,
            None => defaults.max_instance_vertices,
        };
        if split.next().is_some() {
            return Err(ArgError::TrailingLodField);
        }
        Ok(Self {
            path,
            max_strip_length,
            max_instance_vertices,
        })
    }
}

#[derive(Debug, clap::Parser)]
#[command(author, version, about)]
pub struct Cli {
    /// Logging output filters; comma-separated
    #[arg(
        short,
        long,
        default_value = "warn,stripbake=info,bake=info",
        env = "BAKE_LOG_FILTER"
    )]
    pub log_filter: String,
    /// Logging output format
    #[arg(long, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,
    /// Scaling applied to each mesh before translation
    #[arg(short, long, default_value = "1,1,1", value_parser = parse_scale3::<f32>, value_name = "X,Y,Z")]
    pub mesh_scale: Scale3<f32>,
    /// Translation applied to each mesh after scaling
    #[arg(short, long, default_value = "0,0,0", value_parser = parse_vec3::<f32>, value_name = "X,Y,Z")]
    pub translation: Vector3<f32>,
    /// Front face winding of the generated strips
    #[arg(short, long, default_value_t = WindingArg::Clockwise)]
    pub winding: WindingArg,
    /// Where to write the HLSL constants; standard output if absent
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    pub output: Option<PathBuf>,
    /// Levels of detail, most detailed first; every level must pack into the same number of
    /// instances
    #[arg(long = "lod", num_args = 1.., required = true, value_name = "FILE[,STRIP[,INSTANCE]]")]
    pub lods: Vec<LodSpec>,
}

fn parse_vec3<R: FromStr>(
    s: &str,
) -> Result<Vector3<R>, Box<dyn std::error::Error + Send + Sync + 'static>>
where
    <R as FromStr>::Err: std::error::Error + Send + Sync + 'static,
{
    let split: Vec<&str> = s.trim().split(',').collect();
    let &[x, y, z] = split.as_slice() else {
        return Err(ArgError::ComponentCount(split.len()).into());
    };
    Ok(nalgebra::vector![
        R::from_str(x.trim())?,
        R::from_str(y.trim())?,
        R::from_str(z.trim())?
    ])
}

fn parse_scale3<R: FromStr + Scalar>(
    s: &str,
) -> Result<Scale3<R>, Box<dyn std::error::Error + Send + Sync + 'static>>
where
    <R as FromStr>::Err: std::error::Error + Send + Sync + 'static,
{
    parse_vec3::<R>(s).map(Scale3::from)
}

/// Set up pretty log output
pub(crate) fn initialize_tracing(log_filter: &str, log_format: LogFormat) {
    let tsub = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_timer(tracing_subscriber::fmt::time::OffsetTime::new(
            time::UtcOffset::current_local_offset().unwrap_or_else(|e| {
                tracing::warn!("couldn't get local time offset: {:?}", e);
                time::UtcOffset::UTC
            }),
            time::macros::format_description!("[hour]:[minute]:[second]"),
        ))
        .with_env_filter(log_filter);

    match log_format {
        LogFormat::Compact => tsub.compact().init(),
        LogFormat::Full => tsub.init(),
        LogFormat::Pretty => tsub.pretty().init(),
        LogFormat::Json => tsub.json().init(),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn lod_spec() {
        let spec: LodSpec = "block.obj,4,4".parse().unwrap();
        assert_eq!(spec.path, PathBuf::from("block.obj"));
        assert_eq!((spec.max_strip_length, spec.max_instance_vertices), (4, 4));

        let spec: LodSpec = "block.obj".parse().unwrap();
        assert_eq!(spec.config(Winding::Clockwise), Config::default());

        assert!(matches!("".parse::<LodSpec>(), Err(ArgError::MissingPath)));
        assert!(matches!("a.obj,x".parse::<LodSpec>(), Err(ArgError::Int(_))));
        assert!(matches!(
            "a.obj,4,4,4".parse::<LodSpec>(),
            Err(ArgError::TrailingLodField)
        ));
    }

    #[test]
    fn vec3() {
        assert_eq!(
            parse_vec3::<f32>("1, 2,3").unwrap(),
            Vector3::new(1.0, 2.0, 3.0)
        );
        assert!(parse_vec3::<f32>("1,2").is_err());
    }
}
