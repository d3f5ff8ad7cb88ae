use strum::{Display, FromRepr};

/// Packet type tag, the second byte of every packet.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromRepr, Display)]
#[strum(serialize_all = "UPPERCASE")]
pub enum PacketType {
    None = 0,
    Isi = 1,
    Ver = 2,
    Tiny = 3,
    Small = 4,
    Sta = 5,
    Sch = 6,
    Sfp = 7,
    Scc = 8,
    Cpp = 9,
    Ism = 10,
    Mso = 11,
    Iii = 12,
    Mst = 13,
    Mtc = 14,
    Mod = 15,
    Vtn = 16,
    Rst = 17,
    Ncn = 18,
    Cnl = 19,
    Cpr = 20,
    Npl = 21,
    Plp = 22,
    Pll = 23,
    Lap = 24,
    Spx = 25,
    Pit = 26,
    Psf = 27,
    Pla = 28,
    Cch = 29,
    Pen = 30,
    Toc = 31,
    Flg = 32,
    Pfl = 33,
    Fin = 34,
    Res = 35,
    Reo = 36,
    Nlp = 37,
    Mci = 38,
    Msx = 39,
    Msl = 40,
    Crs = 41,
    Bfn = 42,
    Axi = 43,
    Axo = 44,
    Btn = 45,
    Btc = 46,
    Btf = 47,
    Btt = 48,
    Rip = 49,
    Ssh = 50,
    Con = 51,
    Obh = 52,
    Hlv = 53,
    Plc = 54,
    Axm = 55,
    Acr = 56,
    Hcp = 57,
    Nci = 58,
    Jrr = 59,
    Uco = 60,
    Oco = 61,
    Ttc = 62,
    Slc = 63,
    Csc = 64,
    Cim = 65,
    Mal = 66,
    Plh = 67,
    Ipb = 68,
    Aic = 69,
    Aii = 70,
}

/// Sub-types of [`PacketType::Tiny`].
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromRepr, Display)]
#[strum(serialize_all = "UPPERCASE")]
pub enum TinyType {
    /// Keepalive: the host sends it, the client echoes it.
    None = 0,
    Ver = 1,
    Close = 2,
    Ping = 3,
    Reply = 4,
    Vtc = 5,
    Scp = 6,
    Sst = 7,
    Gth = 8,
    Mpe = 9,
    Ism = 10,
    Ren = 11,
    Clr = 12,
    Ncn = 13,
    Npl = 14,
    Res = 15,
    Nlp = 16,
    Mci = 17,
    Reo = 18,
    Rst = 19,
    Axi = 20,
    Axc = 21,
    Rip = 22,
    Nci = 23,
    Alc = 24,
    Axm = 25,
    Slc = 26,
    Mal = 27,
    Plh = 28,
    Ipb = 29,
}

/// Sub-types of [`PacketType::Small`].
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromRepr, Display)]
#[strum(serialize_all = "UPPERCASE")]
pub enum SmallType {
    None = 0,
    Ssp = 1,
    Ssg = 2,
    Vta = 3,
    Tms = 4,
    Stp = 5,
    Rtp = 6,
    Nli = 7,
    Alc = 8,
    Lcs = 9,
    Lcl = 10,
    Aii = 11,
}
