use std::thread;

use clap::Parser;
use insim_client::{ConnectConfig, Connection, Frame, InsimError, UdpChannel};
use insim_proto::{
    Packet, PacketType, car_id::expand_prefix, lang::language_code, laptime::format_time,
};
use tracing::{Level, debug, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber, filter::LevelFilter};

/// Connects to an InSim host and logs every packet it sends.
#[derive(Parser, Debug)]
#[command(name = "insim-tail")]
#[command(about = "Log the packet stream of an InSim host", long_about = None)]
struct Args {
    #[command(flatten)]
    connect: ConnectConfig,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: Level,

    /// Stop after this many TCP packets
    #[arg(long)]
    count: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(args.log_level).into())
        .from_env_lossy();
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut conn = Connection::connect(&args.connect)?;

    let udp = conn.take_udp().map(|udp| {
        thread::Builder::new()
            .name("insim-udp".into())
            .spawn(move || tail_udp(udp))
    });
    let udp = udp.transpose()?;

    let mut seen = 0u64;
    let result = loop {
        if args.count.is_some_and(|max| seen >= max) {
            break Ok(());
        }
        match conn.next_packet() {
            Ok(frame) => log_frame("tcp", frame),
            Err(e) if e.is_disconnect() => {
                info!(reason = %e, "session ended");
                break Ok(());
            }
            Err(e) => break Err(e),
        }
        seen += 1;
    };

    conn.disconnect()?;
    if let Some(handle) = udp {
        if handle.join().is_err() {
            warn!("UDP thread panicked");
        }
    }
    result?;
    Ok(())
}

fn tail_udp(mut udp: UdpChannel) {
    loop {
        match udp.pull_datagram() {
            Ok(frame) => log_frame("udp", frame),
            Err(InsimError::Aborted) => break,
            Err(e) => {
                warn!(error = %e, "UDP receive failed");
                break;
            }
        }
    }
    debug!("UDP tail stopped");
}

fn log_frame(channel: &str, frame: &Frame) {
    match frame.decode() {
        Ok(Packet::Mso(mso)) => info!(channel, ucid = mso.ucid, "MSO {}", mso.msg),
        Ok(Packet::Btc(btc)) => info!(
            channel,
            ucid = btc.ucid,
            click_id = btc.click_id,
            "button clicked"
        ),
        Ok(Packet::Btt(btt)) => info!(
            channel,
            ucid = btt.ucid,
            click_id = btt.click_id,
            "button text {:?}",
            btt.text
        ),
        Ok(Packet::Small(small)) => info!(
            channel,
            sub = ?small.subtype(),
            value = small.value,
            "SMALL"
        ),
        Ok(Packet::Tiny(tiny)) => info!(channel, sub = ?tiny.subtype(), "TINY"),
        Ok(Packet::Ver(ver)) => {
            info!(channel, product = %ver.product, version = %ver.version, "VER")
        }
        Ok(Packet::Other { kind, bytes }) => {
            info!(channel, %kind, len = bytes.len(), "packet");
            log_details(kind, &bytes);
        }
        Err(e) => warn!(
            channel,
            kind = frame.kind_byte(),
            len = frame.len(),
            error = %e,
            "undecodable packet"
        ),
    }
}

/// Extra fields for a few common untyped kinds.
fn log_details(kind: PacketType, bytes: &[u8]) {
    match kind {
        // Lap: PLID, lap time (ms) at offset 4.
        PacketType::Lap if bytes.len() >= 8 => {
            let ms = u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
            if let Some(time) = format_time(i64::from(ms), false) {
                info!(plid = bytes[3], %time, "lap");
            }
        }
        // Player join: car name at offset 40.
        PacketType::Npl if bytes.len() >= 44 => {
            let car = [bytes[40], bytes[41], bytes[42], bytes[43]];
            if let Some(car) = expand_prefix(&car) {
                info!(plid = bytes[3], %car, "player joined");
            }
        }
        // Connection info: language id at offset 4.
        PacketType::Nci if bytes.len() >= 5 => {
            info!(ucid = bytes[3], lang = language_code(bytes[4]), "connection info");
        }
        _ => {}
    }
}
