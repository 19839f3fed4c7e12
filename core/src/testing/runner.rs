use std::{
    collections::HashMap,
    ffi::OsStr,
    io,
    path::{Path, PathBuf},
    process::Stdio,
};

use anyhow::{bail, Context as _};
use tokio::{
    io::{AsyncReadExt as _, AsyncWriteExt as _},
    process::{Child, ChildStdin, ChildStdout, Command},
    time::Instant,
};

use super::{result::*, testcase::TestCase};
use crate::error::Error;
use crate::str_interp::{interp, InterpError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCommand {
    pub compile: Option<String>,
    pub run: String,
}

#[derive(Debug, Clone)]
pub struct TestRunner {
    cmd: TestCommand,
    shell: PathBuf,
    echo_output: bool,
}

impl TestRunner {
    const DEFAULT_SHELL: &str = "/bin/sh";
    const READ_CHUNK_SIZE: usize = 8 * 1024;

    pub fn new(cmd: TestCommand) -> Self {
        Self {
            cmd,
            shell: Self::DEFAULT_SHELL.into(),
            echo_output: false,
        }
    }

    pub fn shell(mut self, shell: impl Into<PathBuf>) -> Self {
        self.shell = shell.into();
        self
    }

    /// Copy the program's stdout to our stdout while it runs.
    pub fn echo_output(mut self, enabled: bool) -> Self {
        self.echo_output = enabled;
        self
    }

    pub fn program_file(
        mut self,
        filepath: impl AsRef<Path>,
    ) -> std::result::Result<Self, InterpError> {
        self.cmd = Self::interpolate_command_with_program_file(filepath, self.cmd)?;
        Ok(self)
    }

    pub fn interpolate_command_with_program_file(
        filepath: impl AsRef<Path>,
        mut cmd: TestCommand,
    ) -> std::result::Result<TestCommand, InterpError> {
        let (id, _) = fsutil::split_extension(filepath.as_ref());
        let vars = Self::make_cmd_interp_vars(filepath.as_ref(), &id);
        cmd.compile = cmd.compile.map(|fmt| interp(&fmt, &vars)).transpose()?;
        cmd.run = interp(&cmd.run, &vars)?;
        Ok(cmd)
    }

    fn make_cmd_interp_vars<'a>(filepath: &'a Path, id: &'a Path) -> HashMap<&'static str, &'a OsStr> {
        let mut m: HashMap<_, &OsStr> = HashMap::new();
        m.insert("id", id.as_os_str());
        m.insert("filePath", filepath.as_os_str());
        m.insert(
            "fileName",
            filepath.file_name().unwrap_or(filepath.as_os_str()),
        );
        m.insert(
            "fileDir",
            filepath
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or(Path::new("."))
                .as_os_str(),
        );
        m.insert(
            "fileStem",
            filepath
                .file_stem()
                .unwrap_or(OsStr::new("UNDEFINED_FILE_STEM")),
        );
        m.insert(
            "fileExt",
            filepath
                .extension()
                .unwrap_or(OsStr::new("UNDEFINED_FILE_EXTENSION")),
        );
        m
    }

    pub fn get_command(&self) -> &TestCommand {
        &self.cmd
    }

    fn shell_command(&self, cmd: &str) -> Command {
        let mut c = Command::new(&self.shell);
        c.args(["-c", cmd]);
        c
    }

    pub async fn compile(&self) -> anyhow::Result<()> {
        let Some(cmd) = &self.cmd.compile else {
            bail!("Undefined compile command")
        };

        let status = self
            .shell_command(cmd)
            .status()
            .await
            .with_context(|| {
                format!(
                    "Failed to spawn '{} -c {}'",
                    self.shell.to_string_lossy(),
                    cmd
                )
            })?;

        match status.code() {
            Some(0) => Ok(()),
            Some(code) => Err(Error::CompileFailure(format!("exitcode={}", code)).into()),
            None => Err(Error::CompileFailure("terminated by signal".to_owned()).into()),
        }
    }

    /// Spawn the program with piped stdin/stdout. stderr is inherited.
    pub fn execute(&self) -> anyhow::Result<Child> {
        let cmd = &self.cmd.run;
        self.shell_command(cmd)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .with_context(|| {
                format!(
                    "Failed to spawn '{} -c {}'",
                    self.shell.to_string_lossy(),
                    cmd
                )
            })
    }

    /// Run the program once against `testcase`.
    ///
    /// Fails only if the program cannot be started; anything that goes wrong
    /// after that is reported as `Verdict::RuntimeError`.
    pub async fn run(&self, testcase: &TestCase) -> anyhow::Result<ExecutionResult> {
        let start_at = Instant::now();
        let mut proc = self.execute()?;
        let stdin = proc.stdin.take().context("Failed to open stdin")?;
        let stdout = proc.stdout.take().context("Failed to open stdout")?;

        let mut captured = Vec::new();
        let (stdin_res, stdout_res, (exit_res, execution_time)) = tokio::join!(
            write_input(stdin, testcase.input.as_bytes()),
            read_output(stdout, self.echo_output, &mut captured),
            async {
                let res = proc.wait().await;
                (res, start_at.elapsed())
            },
        );

        let mut io_failed = false;
        if let Err(e) = stdin_res {
            log::warn!("Failed to pass input-data to stdin: {:#}", e);
            io_failed = true;
        }
        if let Err(e) = stdout_res {
            log::warn!("Failed to read stdout of the program: {:#}", e);
            io_failed = true;
        }
        let (status, exited_normally) = match exit_res {
            Ok(s) => (s.code(), s.success()),
            Err(e) => {
                log::warn!("Failed to wait for the program: {:#}", e);
                (None, false)
            }
        };

        let output = String::from_utf8_lossy(&captured).into_owned();
        let verdict = classify(exited_normally && !io_failed, &testcase.answer, &output);
        Ok(ExecutionResult {
            verdict,
            output,
            status,
            execution_time,
        })
    }
}

async fn write_input(mut stdin: ChildStdin, input: &[u8]) -> io::Result<()> {
    match stdin.write_all(input).await {
        // The program exited without reading all of its input.
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        res => res,
    }
    // `stdin` is dropped here, so the program sees EOF.
}

async fn read_output(
    mut stdout: ChildStdout,
    echo: bool,
    captured: &mut Vec<u8>,
) -> io::Result<()> {
    let mut console = tokio::io::stdout();
    let mut chunk = vec![0u8; TestRunner::READ_CHUNK_SIZE];
    loop {
        let n = stdout.read(&mut chunk).await?;
        if n == 0 {
            return Ok(());
        }
        captured.extend_from_slice(&chunk[..n]);
        if echo {
            let res = async {
                console.write_all(&chunk[..n]).await?;
                console.flush().await
            }
            .await;
            if let Err(e) = res {
                log::debug!("Failed to echo program output: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    struct X {
        input: &'static str,
        answer: &'static str,
        script: &'static str,
        want_verdict: Verdict,
        want_status: Option<i32>,
        want_output: &'static str,
    }

    async fn run_test(x: X) -> ExecutionResult {
        let cmd = TestCommand {
            compile: None,
            run: x.script.to_owned(),
        };
        let t = TestCase::new(x.input, x.answer);
        let r = TestRunner::new(cmd);

        let res = dbg!(r.run(&t).await).unwrap();
        assert_eq!(res.verdict, x.want_verdict);
        assert_eq!(res.status, x.want_status);
        assert_eq!(res.output, x.want_output);
        res
    }

    #[tokio::test]
    async fn should_be_exact() {
        run_test(X {
            input: "3\n",
            answer: "9\n",
            script: "read n; echo $((n * n))",
            want_verdict: Verdict::Exact,
            want_status: Some(0),
            want_output: "9\n",
        })
        .await;
    }

    #[tokio::test]
    async fn should_be_accepted_within_eps() {
        run_test(X {
            input: "3\n",
            answer: "9\n",
            script: "read n; echo 9.0000001",
            want_verdict: Verdict::Accepted,
            want_status: Some(0),
            want_output: "9.0000001\n",
        })
        .await;
    }

    #[tokio::test]
    async fn should_be_wa_beyond_eps() {
        run_test(X {
            input: "3\n",
            answer: "9\n",
            script: "read n; echo 9.00001",
            want_verdict: Verdict::WrongAnswer,
            want_status: Some(0),
            want_output: "9.00001\n",
        })
        .await;
    }

    #[tokio::test]
    async fn should_be_accepted_if_just_missing_newline() {
        run_test(X {
            input: "3\n",
            answer: "9\n",
            script: "printf 9",
            want_verdict: Verdict::Accepted,
            want_status: Some(0),
            want_output: "9",
        })
        .await;
    }

    #[tokio::test]
    async fn should_be_exact_even_if_stdin_is_not_read() {
        run_test(X {
            input: "3\n",
            answer: "9\n",
            script: "echo 9",
            want_verdict: Verdict::Exact,
            want_status: Some(0),
            want_output: "9\n",
        })
        .await;
    }

    #[tokio::test]
    async fn should_be_re_even_if_stdout_is_correct() {
        run_test(X {
            input: "3\n",
            answer: "9\n",
            script: "echo 9; exit 42",
            want_verdict: Verdict::RuntimeError,
            want_status: Some(42),
            want_output: "9\n",
        })
        .await;
    }

    #[tokio::test]
    async fn should_be_re_if_killed_by_signal() {
        run_test(X {
            input: "3\n",
            answer: "9\n",
            script: "kill -9 $$",
            want_verdict: Verdict::RuntimeError,
            want_status: None,
            want_output: "",
        })
        .await;
    }

    #[tokio::test]
    async fn large_io_does_not_deadlock() {
        let input = "0123456789abcdef\n".repeat(256 * 1024);
        let t = TestCase::new(input.clone(), input.clone());
        let r = TestRunner::new(TestCommand {
            compile: None,
            run: "cat".to_owned(),
        });
        let res = r.run(&t).await.unwrap();
        assert_eq!(res.verdict, Verdict::Exact);
        assert_eq!(res.output.len(), input.len());
    }

    #[tokio::test]
    async fn large_unread_input_is_not_an_error() {
        let t = TestCase::new("1\n".repeat(512 * 1024), "ok\n");
        let r = TestRunner::new(TestCommand {
            compile: None,
            run: "echo ok".to_owned(),
        });
        let res = r.run(&t).await.unwrap();
        assert_eq!(res.verdict, Verdict::Exact);
    }

    #[tokio::test]
    async fn compile_ok_and_ng() {
        let ok = TestRunner::new(TestCommand {
            compile: Some("true".to_owned()),
            run: "true".to_owned(),
        });
        ok.compile().await.unwrap();

        let ng = TestRunner::new(TestCommand {
            compile: Some("exit 3".to_owned()),
            run: "true".to_owned(),
        });
        let err = ng.compile().await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::CompileFailure(msg)) if msg == "exitcode=3"
        ));

        let undefined = TestRunner::new(TestCommand {
            compile: None,
            run: "true".to_owned(),
        });
        assert!(undefined.compile().await.is_err());
    }

    #[test]
    fn interpolate_program_file() {
        let cmd = TestCommand {
            compile: Some("g++ -o #{id} #{fileName}".to_owned()),
            run: "./#{id} # in #{fileDir}".to_owned(),
        };
        let r = TestRunner::new(cmd).program_file("work/4A.cpp").unwrap();
        assert_eq!(
            r.get_command(),
            &TestCommand {
                compile: Some("g++ -o work/4A 4A.cpp".to_owned()),
                run: "./work/4A # in work".to_owned(),
            }
        );

        let r = TestRunner::new(TestCommand {
            compile: None,
            run: "python3 #{id}.py".to_owned(),
        })
        .program_file("sq.py")
        .unwrap();
        assert_eq!(r.get_command().run, "python3 sq.py");
        assert_eq!(r.get_command().compile, None);
    }

    #[test]
    fn interpolate_undefined_var() {
        let r = TestRunner::new(TestCommand {
            compile: None,
            run: "#{binary}".to_owned(),
        })
        .program_file("a.c");
        assert!(r.is_err());
    }
}
