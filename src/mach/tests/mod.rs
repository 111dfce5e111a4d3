use crate::mach::{Event, Program, Runtime};


fn push(n: u32) -> String {
    format!("500200990{}200", n)
}

fn op(code: &str) -> String {
    format!("{}200", code)
}

fn branch(code: &str, target: usize) -> String {
    format!("{}200990{:05}200", code, target)
}

fn text(s: &str) -> String {
    let mut code = String::from("010200");
    for ch in s.chars() {
        let value = (ch as u32).to_string();
        code.push_str(&value.len().to_string());
        code.push_str(&value);
    }
    code.push_str("200");
    code
}

fn runtime(code: &str) -> Runtime {
    match Program::compile(code) {
        Ok(program) => Runtime::new(program),
        Err(e) => panic!("{} : {:?}", e, code),
    }
}

fn run(runtime: &mut Runtime) -> String {
    run_cycles(runtime, 5000)
}

fn run_cycles(runtime: &mut Runtime, cycles: usize) -> String {
    let mut s: Vec<u8> = vec![];
    let mut prev_running = false;
    loop {
        let event = runtime.execute(cycles);
        match &event {
            Event::Stopped => {
                break;
            }
            Event::Error(error) => {
                s.extend_from_slice(format!("{}\n", error).as_bytes());
            }
            Event::Running => {
                if prev_running {
                    s.extend_from_slice(format!("\n{} Execution cycles exceeded.\n", cycles).as_bytes());
                    break;
                }
            }
            Event::Print(ps) => {
                s.extend_from_slice(ps.as_bytes());
            }
            Event::PrintByte(b) => {
                s.push(*b);
            }
            Event::Input => {
                runtime.close_input();
            }
        }
        prev_running = event == Event::Running;
    }
    String::from_utf8_lossy(&s).into_owned()
}
