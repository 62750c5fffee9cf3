//! Common test utilities for integration tests

use httpmock::prelude::*;
use std::io::{BufRead, BufReader, Cursor, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::thread;

/// CSV fixture served plain and zipped as `file.csv`
#[allow(dead_code)]
pub const FILE01_CSV: &str =
    "código;município;uf\r\n1;São Paulo;SP\r\n2;\"Natal; Centro\";RN\r\n";

/// JSON fixture
#[allow(dead_code)]
pub const FILE02_JSON: &str =
    r#"{"estado": "Rio Grande do Norte", "capital": "Natal", "ddd": [84]}"#;

/// Fixed-width fixture: header, two details, footer
#[allow(dead_code)]
pub const EXAMPLE01_FWF: &str = "0CIDADES \n1Natal     RN\n1Recife    PE\n90002\n";

/// Helper function to build an in-memory ZIP file with the specified files
#[allow(dead_code)]
pub fn create_test_zip(files: &[(&str, &[u8])]) -> Vec<u8> {
    use zip::write::FileOptions;
    use zip::ZipWriter;

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    for (name, content) in files {
        zip.start_file(*name, options).unwrap();
        zip.write_all(content).unwrap();
    }

    zip.finish().unwrap().into_inner()
}

/// Starts a mock server exposing the fixtures the way a static file server would.
///
/// Unknown paths answer `404 File not found` with an HTML content type.
#[allow(dead_code)]
pub fn start_fixture_server() -> MockServer {
    let server = MockServer::start();

    let file01_zip = create_test_zip(&[("file.csv", FILE01_CSV.as_bytes())]);
    let file02_zip = create_test_zip(&[
        ("file.json", FILE02_JSON.as_bytes()),
        ("notes.txt", b"second entry".as_slice()),
    ]);
    let fwf_zip = create_test_zip(&[("example01.fwf", EXAMPLE01_FWF.as_bytes())]);

    let files: Vec<(&str, Vec<u8>)> = vec![
        ("/file01_csv", FILE01_CSV.as_bytes().to_vec()),
        ("/file01_zip", file01_zip),
        ("/file02_json", FILE02_JSON.as_bytes().to_vec()),
        ("/file02_zip", file02_zip),
        ("/example01_are_right.fwf.zip", fwf_zip),
        ("/broken_json", b"{\"estado\": ".to_vec()),
        ("/broken_zip", b"PK\x03\x04 this is not really a zip".to_vec()),
    ];

    for (path, body) in files {
        server.mock(|when, then| {
            when.method(GET).path(path);
            then.status(200).body(&body);
        });
    }

    server.mock(|when, then| {
        when.method(GET).path("/file_not_found");
        then.status(404)
            .header("Content-Type", "text/html;charset=utf-8")
            .body("<html><body>File not found</body></html>");
    });

    server
}

/// Answers a single HTTP request with `response` written verbatim and returns the
/// server's base URL.
///
/// Used where the status line matters, e.g. a custom reason phrase.
#[allow(dead_code)]
pub fn serve_raw_http_once(response: String) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            match stream.read(&mut buf) {
                Ok(0) | Err(_) => break,
                Ok(n) => request.extend_from_slice(&buf[..n]),
            }
        }
        let _ = stream.write_all(response.as_bytes());
    });

    format!("http://{addr}")
}

/// Builds a `Connection: close` response with an HTML body
#[allow(dead_code)]
pub fn raw_http_response(status_line: &str, body: &str) -> String {
    format!(
        "{status_line}\r\n\
         Content-Type: text/html;charset=utf-8\r\n\
         Content-Length: {}\r\n\
         Connection: close\r\n\r\n{body}",
        body.len()
    )
}

/// Starts a scripted FTP server for one control session and returns its port.
///
/// `files` maps absolute paths such as `/cnes/informe.txt` to their content. The
/// server understands USER, PASS, TYPE, CWD, PASV, RETR and QUIT; `CWD` into a
/// directory that holds none of `files` answers `550`.
#[allow(dead_code)]
pub fn start_ftp_server(files: Vec<(&'static str, Vec<u8>)>) -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();

    thread::spawn(move || {
        let (control, _) = listener.accept().unwrap();
        run_ftp_session(control, &files);
    });

    port
}

#[allow(dead_code)]
fn run_ftp_session(mut control: TcpStream, files: &[(&'static str, Vec<u8>)]) {
    let mut reader = BufReader::new(control.try_clone().unwrap());
    let mut cwd = String::new();
    let mut data_listener: Option<TcpListener> = None;
    reply(&mut control, "220 brfied test server ready");

    loop {
        let mut line = String::new();
        match reader.read_line(&mut line) {
            Ok(0) | Err(_) => return,
            Ok(_) => {}
        }
        let line = line.trim_end();
        let (command, arg) = line.split_once(' ').unwrap_or((line, ""));

        match command.to_ascii_uppercase().as_str() {
            "USER" => reply(&mut control, "331 Password required"),
            "PASS" => reply(&mut control, "230 Logged in"),
            "TYPE" => reply(&mut control, "200 Type set"),
            "CWD" => {
                let target = format!("{cwd}/{arg}");
                let prefix = format!("{target}/");
                if files.iter().any(|(path, _)| path.starts_with(&prefix)) {
                    cwd = target;
                    reply(&mut control, "250 Directory changed");
                } else {
                    reply(&mut control, "550 No such directory");
                }
            }
            "PASV" => {
                let listener = TcpListener::bind("127.0.0.1:0").unwrap();
                let data_port = listener.local_addr().unwrap().port();
                data_listener = Some(listener);
                reply(
                    &mut control,
                    &format!(
                        "227 Entering Passive Mode (127,0,0,1,{},{})",
                        data_port / 256,
                        data_port % 256
                    ),
                );
            }
            "RETR" => {
                let path = format!("{cwd}/{arg}");
                let listener = data_listener.take();
                match (files.iter().find(|(p, _)| *p == path), listener) {
                    (Some((_, content)), Some(listener)) => {
                        reply(&mut control, "150 Opening BINARY mode data connection");
                        let (mut data, _) = listener.accept().unwrap();
                        data.write_all(content).unwrap();
                        drop(data);
                        reply(&mut control, "226 Transfer complete");
                    }
                    _ => reply(&mut control, "550 File not found"),
                }
            }
            "QUIT" => {
                reply(&mut control, "221 Goodbye");
                return;
            }
            _ => reply(&mut control, "502 Command not implemented"),
        }
    }
}

#[allow(dead_code)]
fn reply(control: &mut TcpStream, line: &str) {
    control.write_all(format!("{line}\r\n").as_bytes()).unwrap();
}

/// Routes crate logs to the test output; safe to call from every test
#[allow(dead_code)]
pub fn init_logging() {
    let _ = brfied::logging::init(brfied::constants::DEFAULT_LOG_FILTER);
}
