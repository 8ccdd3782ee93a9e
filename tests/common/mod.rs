#![allow(dead_code)]

use std::{
    cell::RefCell,
    ffi::OsString,
    fs, io,
    path::{Path, PathBuf},
};

use stem_separate::{Invocation, SeparateOptions, ToolOutput, ToolPaths, ToolRunner};

/// What a fake tool does when it is run for real (not `--help`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Behaviour {
    /// Executable is not installed.
    Missing,
    /// `--help` fails too.
    Broken,
    /// Writes MP3 stems (Demucs) or WAV stems (Spleeter).
    Succeed,
    /// Demucs only: writes WAV stems instead of MP3.
    WavOnly,
    /// Exits 0 but writes nothing.
    NoOutput,
    /// Creates the stems directory and leaves it empty.
    EmptyDir,
    /// Writes the vocals stem only.
    VocalsOnly,
    /// Exits 1 with a diagnostic on stderr.
    Fail,
}

/// In-process stand-in for demucs, spleeter and ffmpeg.
pub struct FakeRunner {
    pub demucs: Behaviour,
    pub spleeter: Behaviour,
    pub ffmpeg: Behaviour,
    pub calls: RefCell<Vec<Vec<String>>>,
}

impl FakeRunner {
    pub fn new(demucs: Behaviour, spleeter: Behaviour) -> Self {
        Self {
            demucs,
            spleeter,
            ffmpeg: Behaviour::Succeed,
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Calls made to `program`, excluding `--help` probes.
    pub fn runs_of(&self, program: &str) -> Vec<Vec<String>> {
        self.calls
            .borrow()
            .iter()
            .filter(|c| c[0] == program && c.get(1).map(String::as_str) != Some("--help"))
            .cloned()
            .collect()
    }

    pub fn probes_of(&self, program: &str) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|c| c[0] == program && c.get(1).map(String::as_str) == Some("--help"))
            .count()
    }

    fn demucs(&self, args: &[OsString]) -> io::Result<ToolOutput> {
        let out_dir = path_after(args, "-o");
        let model = if args.iter().any(|a| a == "-n") {
            path_after(args, "-n")
        } else {
            PathBuf::from("htdemucs")
        };
        let stems = out_dir.join(model).join(base_name(args.last().unwrap()));
        let ext = match self.demucs {
            Behaviour::WavOnly => "wav",
            _ => "mp3",
        };
        write_stems(
            &stems,
            self.demucs,
            (format!("vocals.{ext}").as_str(), &b"VOCALS"[..]),
            (format!("no_vocals.{ext}").as_str(), &b"NO_VOCALS"[..]),
        )
    }

    fn spleeter(&self, args: &[OsString]) -> io::Result<ToolOutput> {
        let out_dir = path_after(args, "-o");
        let stems = out_dir.join(base_name(args.last().unwrap()));
        write_stems(
            &stems,
            self.spleeter,
            ("vocals.wav", &b"VOCALS"[..]),
            ("accompaniment.wav", &b"ACCOMPANIMENT"[..]),
        )
    }

    // ffmpeg -y -i <src> -q:a <q> <dst>: "encode" by prefixing the bytes.
    fn ffmpeg(&self, args: &[String]) -> io::Result<ToolOutput> {
        let src = value_after(args, "-i");
        let dst = args.last().unwrap();
        let mut data = b"MP3:".to_vec();
        data.extend(fs::read(src)?);
        fs::write(dst, data)?;
        Ok(ok())
    }
}

impl ToolRunner for FakeRunner {
    fn run(&self, cmd: &Invocation) -> io::Result<ToolOutput> {
        let program = cmd.program.to_string_lossy().into_owned();
        let args: Vec<String> = cmd
            .args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();

        let mut call = vec![program.clone()];
        call.extend(args.iter().cloned());
        self.calls.borrow_mut().push(call);

        let behaviour = match program.as_str() {
            "demucs" => self.demucs,
            "spleeter" => self.spleeter,
            "ffmpeg" => self.ffmpeg,
            _ => Behaviour::Missing,
        };

        match behaviour {
            Behaviour::Missing => Err(io::Error::new(io::ErrorKind::NotFound, "not found")),
            Behaviour::Broken => Ok(failed("broken install")),
            _ if args.first().map(String::as_str) == Some("--help") => Ok(ok()),
            Behaviour::Fail => Ok(failed("RuntimeError: out of memory")),
            Behaviour::NoOutput => Ok(ok()),
            _ => match program.as_str() {
                "demucs" => self.demucs(&cmd.args),
                "spleeter" => self.spleeter(&cmd.args),
                _ => self.ffmpeg(&args),
            },
        }
    }
}

pub fn ok() -> ToolOutput {
    ToolOutput {
        success: true,
        code: Some(0),
        ..ToolOutput::default()
    }
}

pub fn failed(stderr: &str) -> ToolOutput {
    ToolOutput {
        success: false,
        code: Some(1),
        stderr: stderr.to_string(),
        ..ToolOutput::default()
    }
}

fn value_after(args: &[String], flag: &str) -> String {
    let i = args.iter().position(|a| a == flag).unwrap();
    args[i + 1].clone()
}

fn path_after(args: &[OsString], flag: &str) -> PathBuf {
    let i = args.iter().position(|a| a == flag).unwrap();
    PathBuf::from(&args[i + 1])
}

fn base_name(input: &OsString) -> OsString {
    Path::new(input).file_stem().unwrap().to_os_string()
}

fn write_stems(
    stems: &Path,
    behaviour: Behaviour,
    vocals: (&str, &[u8]),
    accompaniment: (&str, &[u8]),
) -> io::Result<ToolOutput> {
    fs::create_dir_all(stems)?;
    if behaviour == Behaviour::EmptyDir {
        return Ok(ok());
    }
    fs::write(stems.join(vocals.0), vocals.1)?;
    if behaviour != Behaviour::VocalsOnly {
        fs::write(stems.join(accompaniment.0), accompaniment.1)?;
    }
    Ok(ok())
}

/// Options pinned to bare tool names so environment overrides cannot leak in.
pub fn options(output_dir: &Path) -> SeparateOptions {
    SeparateOptions {
        output_dir: output_dir.to_path_buf(),
        tools: ToolPaths::system(),
        ..SeparateOptions::default()
    }
}

pub fn write_input(dir: &Path, name: &str) -> PathBuf {
    let p = dir.join(name);
    fs::write(&p, b"ID3 fake song").unwrap();
    p
}
