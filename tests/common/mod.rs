#![allow(dead_code)]
use charless::mach::{Event, Program, Runtime};

pub fn fixture(name: &str) -> String {
    let path = format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name);
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("{}: {}", path, e))
}

pub fn runtime(code: &str) -> Runtime {
    match Program::compile(code) {
        Ok(program) => Runtime::new(program),
        Err(e) => panic!("{} : {:?}", e, code),
    }
}

pub fn exec(runtime: &mut Runtime) -> String {
    exec_input(runtime, &[])
}

/// Runs to completion, feeding `lines` one at a time as input is requested.
pub fn exec_input(runtime: &mut Runtime, lines: &[&str]) -> String {
    let mut s: Vec<u8> = vec![];
    let mut lines = lines.iter();
    let mut prev_running = false;
    loop {
        let event = runtime.execute(5000);
        match &event {
            Event::Stopped => {
                break;
            }
            Event::Error(error) => {
                s.extend_from_slice(format!("{}\n", error).as_bytes());
            }
            Event::Running => {
                if prev_running {
                    s.extend_from_slice(b"\nExecution cycles exceeded.\n");
                    break;
                }
            }
            Event::Print(ps) => {
                s.extend_from_slice(ps.as_bytes());
            }
            Event::PrintByte(b) => {
                s.push(*b);
            }
            Event::Input => match lines.next() {
                Some(line) => runtime.enter(line),
                None => runtime.close_input(),
            },
        }
        prev_running = event == Event::Running;
    }
    String::from_utf8_lossy(&s).into_owned()
}
