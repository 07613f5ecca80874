//! Device control service client
//!
//! The service exposes `GET /get_devices` and `POST /set_location`.

use std::time::Duration;

use geo::geometry::Point;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use crate::error::{Result, WalkerError};

pub mod clock;
pub mod sink;
pub mod timezone;

use sink::LocationSink;

/// Device listed by the control service
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct DeviceInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub display_name: String,
    pub udid: String,
}

#[derive(Debug, Serialize)]
struct LocationUpdate<'a> {
    lat: f64,
    lng: f64,
    udid: &'a str,
}

/// Blocking client of the device control service
pub struct DeviceControl {
    base: String,
    http: Client,
}

impl DeviceControl {
    pub fn new(base: &str, timeout: Duration) -> Result<Self> {
        let http = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base: base.trim_end_matches('/').to_string(),
            http,
        })
    }

    /// All devices the service can drive
    pub fn devices(&self) -> Result<Vec<DeviceInfo>> {
        let to_err = |e: reqwest::Error| WalkerError::DeviceResolution(e.to_string());

        self.http
            .get(format!("{}/get_devices", self.base))
            .send()
            .and_then(|resp| resp.error_for_status())
            .map_err(to_err)?
            .json::<Vec<DeviceInfo>>()
            .map_err(to_err)
    }

    /// Pick the first listed device. Without one there is nothing to drive.
    pub fn resolve_device(&self) -> Result<String> {
        let device = self
            .devices()?
            .into_iter()
            .next()
            .ok_or_else(|| WalkerError::DeviceResolution("no devices listed".to_string()))?;

        if device.udid.trim().is_empty() {
            return Err(WalkerError::DeviceResolution(format!(
                "device `{}` has no udid",
                device.name
            )));
        }

        log::info!("driving device `{}` ({})", device.display_name, device.udid);

        Ok(device.udid)
    }
}

impl LocationSink for DeviceControl {
    fn set_location(&self, coordinates: Point, udid: &str) -> Result<()> {
        let update = LocationUpdate {
            lat: coordinates.y(),
            lng: coordinates.x(),
            udid,
        };

        // The reply carries nothing we act on
        self.http
            .post(format!("{}/set_location", self.base))
            .json(&update)
            .send()?;

        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::io::{Read, Write};
    use std::net::{TcpListener, TcpStream};
    use std::thread::{self, JoinHandle};

    /// Answer a single HTTP request, handing the raw request back
    pub fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let request = read_request(&mut stream);

            let response = format!(
                concat!(
                    "HTTP/1.1 {}\r\n",
                    "Content-Type: application/json\r\n",
                    "Content-Length: {}\r\n",
                    "Connection: close\r\n\r\n{}"
                ),
                status,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).unwrap();

            request
        });

        (format!("http://{}", addr), handle)
    }

    /// Address nobody listens on
    pub fn closed_port() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        format!("http://{}", addr)
    }

    fn read_request(stream: &mut TcpStream) -> String {
        let mut buf = vec![];
        let mut chunk = [0u8; 1024];

        loop {
            let n = stream.read(&mut chunk).unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);

            let text = String::from_utf8_lossy(&buf).to_string();
            if let Some(end) = text.find("\r\n\r\n") {
                let length = text[..end]
                    .lines()
                    .filter_map(|l| l.split_once(':'))
                    .find(|(k, _)| k.eq_ignore_ascii_case("content-length"))
                    .and_then(|(_, v)| v.trim().parse::<usize>().ok())
                    .unwrap_or(0);

                if buf.len() >= end + 4 + length {
                    break;
                }
            }
        }

        String::from_utf8_lossy(&buf).to_string()
    }
}
