//! Scripted [`CommandRunner`] for unit tests.

use super::{CommandRunner, display_command};
use crate::error::{Result, SunpkgError};
use std::collections::VecDeque;
use std::path::Path;
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    /// File name of the program, e.g. `pkgadd`
    pub program: String,
    pub args: Vec<String>,
    pub fail_on_nonzero: bool,
}

#[derive(Debug, Clone)]
pub enum Reply {
    /// Exit 0 with this output
    Output(String),
    /// Nonzero exit with this output
    Fail(String),
}

struct Rule {
    program: String,
    args: Vec<String>,
    replies: VecDeque<Reply>,
}

/// Replies are matched on program file name and exact argv. Several replies
/// for the same invocation are handed out in order; the last one repeats.
#[derive(Default)]
pub struct FakeRunner {
    rules: Mutex<Vec<Rule>>,
    calls: Mutex<Vec<Call>>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(self, program: &str, args: &[&str], reply: Reply) -> Self {
        let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
        {
            let mut rules = self.rules.lock().expect("rules lock");
            match rules
                .iter_mut()
                .find(|r| r.program == program && r.args == args)
            {
                Some(rule) => rule.replies.push_back(reply),
                None => rules.push(Rule {
                    program: program.to_string(),
                    args,
                    replies: VecDeque::from([reply]),
                }),
            }
        }
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().expect("calls lock").clone()
    }

    /// Program names in invocation order.
    pub fn programs(&self) -> Vec<String> {
        self.calls().into_iter().map(|c| c.program).collect()
    }

    pub fn count(&self, program: &str) -> usize {
        self.calls().iter().filter(|c| c.program == program).count()
    }
}

impl CommandRunner for FakeRunner {
    fn execute(&self, program: &Path, args: &[String], fail_on_nonzero: bool) -> Result<String> {
        let name = program
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        self.calls.lock().expect("calls lock").push(Call {
            program: name.clone(),
            args: args.to_vec(),
            fail_on_nonzero,
        });

        let reply = {
            let mut rules = self.rules.lock().expect("rules lock");
            let rule = rules
                .iter_mut()
                .find(|r| r.program == name && r.args == args)
                .ok_or_else(|| SunpkgError::SystemCommandFailed {
                    command: display_command(program, args),
                    reason: "no scripted reply".to_string(),
                })?;
            if rule.replies.len() > 1 {
                rule.replies.pop_front()
            } else {
                rule.replies.front().cloned()
            }
        };

        match reply {
            Some(Reply::Output(text)) => Ok(text),
            Some(Reply::Fail(text)) if fail_on_nonzero => Err(SunpkgError::SystemCommandFailed {
                command: display_command(program, args),
                reason: format!("exit status 1: {}", text.trim()),
            }),
            Some(Reply::Fail(text)) => Ok(text),
            None => Ok(String::new()),
        }
    }
}
