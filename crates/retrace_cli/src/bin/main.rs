use retrace::{Flags, Program};
use std::env;
use std::fs;
use std::io::{self, BufRead, BufWriter, Read, Write};

const VERSION: &str = concat!("retrace ", env!("CARGO_PKG_VERSION"));

fn print_usage() {
    eprintln!("usage: retrace [options] pattern [file ...]");
    eprintln!("Available options are:");
    eprintln!("  -i        case-insensitive matching");
    eprintln!("  -m        '^' and '$' match at line terminators");
    eprintln!("  -s        '.' matches line terminators");
    eprintln!("  -x        ignore whitespace and '#' comments in the pattern");
    eprintln!("  -F        treat the pattern as a literal string");
    eprintln!("  -U        Unicode predefined character classes");
    eprintln!("  -c        print only the number of matching lines");
    eprintln!("  -o        print only the matched parts of a line");
    eprintln!("  -n        prefix each output line with its line number");
    eprintln!("  -r tmpl   print lines with every match replaced by 'tmpl'");
    eprintln!("  --split n print the pieces of each line split around matches");
    eprintln!("  -v        show version information");
    eprintln!("  --        stop handling options");
}

#[derive(Default)]
struct Options {
    flags: Flags,
    count: bool,
    only_matching: bool,
    line_numbers: bool,
    replacement: Option<String>,
    split_limit: Option<isize>,
    show_version: bool,
    pattern: Option<String>,
    files: Vec<String>,
}

fn parse_args() -> Result<Options, String> {
    let args: Vec<String> = env::args().collect();
    let mut opts = Options::default();
    let mut i = 1;
    let mut stop_options = false;

    while i < args.len() {
        let arg = &args[i];

        if !stop_options && arg.starts_with('-') && arg.len() > 1 {
            match arg.as_str() {
                "-i" => opts.flags |= Flags::CASE_INSENSITIVE,
                "-m" => opts.flags |= Flags::MULTILINE,
                "-s" => opts.flags |= Flags::DOTALL,
                "-x" => opts.flags |= Flags::COMMENTS,
                "-F" => opts.flags |= Flags::LITERAL,
                "-U" => opts.flags |= Flags::UNICODE_CHARACTER_CLASS,
                "-c" => opts.count = true,
                "-o" => opts.only_matching = true,
                "-n" => opts.line_numbers = true,
                "-v" => opts.show_version = true,
                "-r" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("'-r' needs argument".to_string());
                    }
                    opts.replacement = Some(args[i].clone());
                }
                "--split" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("'--split' needs argument".to_string());
                    }
                    let limit = args[i]
                        .parse::<isize>()
                        .map_err(|_| format!("invalid split limit '{}'", args[i]))?;
                    opts.split_limit = Some(limit);
                }
                "--" => stop_options = true,
                _ => {
                    return Err(format!("unrecognized option '{}'", arg));
                }
            }
        } else if opts.pattern.is_none() {
            opts.pattern = Some(arg.clone());
        } else {
            opts.files.push(arg.clone());
        }
        i += 1;
    }

    if opts.replacement.is_some() && opts.split_limit.is_some() {
        return Err("'-r' and '--split' cannot be combined".to_string());
    }
    Ok(opts)
}

/// What is printed for each input line.
enum Mode {
    Lines,
    Count,
    OnlyMatching,
    Replace(String),
    Split(isize),
}

struct Grep<'a, W: Write> {
    program: &'a Program,
    mode: &'a Mode,
    line_numbers: bool,
    out: W,
    matched_lines: u64,
}

impl<W: Write> Grep<'_, W> {
    fn prefix(&mut self, number: usize) -> io::Result<()> {
        if self.line_numbers {
            let mut buf = itoa::Buffer::new();
            self.out.write_all(buf.format(number).as_bytes())?;
            self.out.write_all(b":")?;
        }
        Ok(())
    }

    fn line(&mut self, number: usize, line: &str) -> Result<(), String> {
        let mut m = self.program.matcher(line);
        if !m.find() {
            return Ok(());
        }
        self.matched_lines += 1;
        let io_err = |e: io::Error| e.to_string();
        let mode = self.mode;
        match mode {
            Mode::Count => {}
            Mode::Lines => {
                self.prefix(number).map_err(io_err)?;
                writeln!(self.out, "{line}").map_err(io_err)?;
            }
            Mode::OnlyMatching => {
                // find() already positioned the matcher on the first match
                loop {
                    let text = m.group().map_err(|e| e.to_string())?;
                    if !text.is_empty() {
                        self.prefix(number).map_err(io_err)?;
                        writeln!(self.out, "{text}").map_err(io_err)?;
                    }
                    if !m.find() {
                        break;
                    }
                }
            }
            Mode::Replace(template) => {
                let replaced = m.replace_all(template).map_err(|e| e.to_string())?;
                self.prefix(number).map_err(io_err)?;
                writeln!(self.out, "{replaced}").map_err(io_err)?;
            }
            Mode::Split(limit) => {
                for piece in self.program.split(line, *limit) {
                    self.prefix(number).map_err(io_err)?;
                    writeln!(self.out, "{piece}").map_err(io_err)?;
                }
            }
        }
        Ok(())
    }

    fn input(&mut self, reader: impl BufRead) -> Result<(), String> {
        for (index, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| format!("error reading input: {}", e))?;
            self.line(index + 1, &line)?;
        }
        Ok(())
    }
}

fn run(opts: Options) -> Result<bool, String> {
    let Some(pattern) = opts.pattern else {
        return Err("no pattern given".to_string());
    };
    let program = Program::new(&pattern, opts.flags).map_err(|e| e.to_string())?;
    log::debug!("searching with {:?}", program);

    let mode = if opts.count {
        Mode::Count
    } else if let Some(template) = opts.replacement {
        Mode::Replace(template)
    } else if let Some(limit) = opts.split_limit {
        Mode::Split(limit)
    } else if opts.only_matching {
        Mode::OnlyMatching
    } else {
        Mode::Lines
    };

    let stdout = io::stdout();
    let mut grep = Grep {
        program: &program,
        mode: &mode,
        line_numbers: opts.line_numbers,
        out: BufWriter::new(stdout.lock()),
        matched_lines: 0,
    };

    if opts.files.is_empty() {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .map_err(|e| format!("error reading stdin: {}", e))?;
        grep.input(text.as_bytes())?;
    } else {
        for file in &opts.files {
            let text =
                fs::read_to_string(file).map_err(|e| format!("cannot open {}: {}", file, e))?;
            grep.input(text.as_bytes())?;
        }
    }

    if let Mode::Count = mode {
        let mut buf = itoa::Buffer::new();
        writeln!(grep.out, "{}", buf.format(grep.matched_lines)).map_err(|e| e.to_string())?;
    }
    grep.out.flush().map_err(|e| e.to_string())?;
    Ok(grep.matched_lines > 0)
}

fn main() {
    env_logger::init();

    // Deeply nested repetition recurses once per iteration; give the search
    // more native stack than the default main thread has.
    let stack_size = 64 * 1024 * 1024;
    let builder = std::thread::Builder::new()
        .name("retrace-main".into())
        .stack_size(stack_size);

    let handler = match builder.spawn(retrace_main) {
        Ok(handler) => handler,
        Err(e) => {
            eprintln!("retrace: cannot start search thread: {}", e);
            std::process::exit(2);
        }
    };

    match handler.join() {
        Ok(code) => std::process::exit(code),
        Err(_) => {
            eprintln!("retrace: internal error (thread panicked)");
            std::process::exit(2);
        }
    }
}

fn retrace_main() -> i32 {
    let opts = match parse_args() {
        Ok(opts) => opts,
        Err(e) => {
            eprintln!("retrace: {}", e);
            print_usage();
            return 2;
        }
    };

    if opts.show_version {
        println!("{}", VERSION);
        if opts.pattern.is_none() {
            return 0;
        }
    }

    match run(opts) {
        Ok(true) => 0,
        Ok(false) => 1,
        Err(e) => {
            eprintln!("retrace: {}", e);
            2
        }
    }
}
