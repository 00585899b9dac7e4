//{
fn main() -> std::io::Result<()> {
    //}
    use {
        std::io::{prelude::*, BufReader},
        uds_listen::{listen, ListenErrorKind},
    };

    let path = "/tmp/uds-listen-example.sock";

    let listener = match listen(path, 0o660) {
        Err(e) if e.kind() == ListenErrorKind::AddrInUse => {
            // Unlike a socket file left behind by a crashed server, which
            // listen() deletes and binds over, this one has someone
            // accepting connections on it.
            eprintln!("Error: {path} is served by another process.");
            return Err(e.into());
        }
        x => x?,
    };

    // This is a good place to inform clients that the server is ready.
    eprintln!("Server running at {path}");

    let mut buffer = String::with_capacity(128);
    for conn in listener.inner().incoming() {
        let mut conn = match conn {
            Ok(c) => BufReader::new(c),
            Err(e) => {
                eprintln!("Incoming connection failed: {e}");
                continue;
            }
        };
        conn.read_line(&mut buffer)?;
        conn.get_mut().write_all(b"Hello from server!\n")?;
        print!("Client answered: {buffer}");
        buffer.clear();
    }
    //{
    Ok(())
} //}
