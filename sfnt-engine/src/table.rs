//! Tables of a font, dispatched by tag.

use sfnt_read::{
    tables::{
        cmap::{self, Cmap},
        glyf::{self, Glyf},
        gsub::{self, Gsub},
        head::{self, Head},
        hhea::{self, Hhea},
        hmtx::{self, Hmtx},
        kern::{self, Kern},
        loca::{self, Loca},
        maxp::{self, Maxp},
        name::{self, Name},
        os2::{self, Os2},
        post::{self, Post},
        vhea::{self, Vhea},
        vmtx::{self, Vmtx},
        vorg::{self, Vorg},
    },
    FontData, ReadError, TableProvider,
};
use sfnt_types::Tag;

/// A parsed table.
///
/// Tables without a model here are kept as their raw bytes.
#[derive(Clone, Debug)]
pub enum Table<'a> {
    Head(Head<'a>),
    Hhea(Hhea<'a>),
    Vhea(Vhea<'a>),
    Maxp(Maxp<'a>),
    Hmtx(Hmtx<'a>),
    Vmtx(Vmtx<'a>),
    Loca(Loca<'a>),
    Glyf(Glyf<'a>),
    Cmap(Cmap<'a>),
    Name(Name<'a>),
    Os2(Os2<'a>),
    Post(Post<'a>),
    Gsub(Gsub<'a>),
    Kern(Kern<'a>),
    Vorg(Vorg<'a>),
    Unknown(Tag, FontData<'a>),
}

impl<'a> Table<'a> {
    /// Parses the table with the given tag from `provider`.
    ///
    /// Tables that depend on others (`hmtx`, `vmtx` and `loca`) read their
    /// parameters through the same provider.
    pub fn parse(provider: &impl TableProvider<'a>, tag: Tag) -> Result<Self, ReadError> {
        Ok(match tag {
            head::TAG => Table::Head(provider.head()?),
            hhea::TAG => Table::Hhea(provider.hhea()?),
            vhea::TAG => Table::Vhea(provider.vhea()?),
            maxp::TAG => Table::Maxp(provider.maxp()?),
            hmtx::TAG => Table::Hmtx(provider.hmtx()?),
            vmtx::TAG => Table::Vmtx(provider.vmtx()?),
            loca::TAG => Table::Loca(provider.loca(None)?),
            glyf::TAG => Table::Glyf(provider.glyf()?),
            cmap::TAG => Table::Cmap(provider.cmap()?),
            name::TAG => Table::Name(provider.name()?),
            os2::TAG => Table::Os2(provider.os2()?),
            post::TAG => Table::Post(provider.post()?),
            gsub::TAG => Table::Gsub(provider.gsub()?),
            kern::TAG => Table::Kern(provider.kern()?),
            vorg::TAG => Table::Vorg(provider.vorg()?),
            _ => Table::Unknown(tag, provider.expect_data_for_tag(tag)?),
        })
    }

    pub fn tag(&self) -> Tag {
        match self {
            Table::Head(_) => head::TAG,
            Table::Hhea(_) => hhea::TAG,
            Table::Vhea(_) => vhea::TAG,
            Table::Maxp(_) => maxp::TAG,
            Table::Hmtx(_) => hmtx::TAG,
            Table::Vmtx(_) => vmtx::TAG,
            Table::Loca(_) => loca::TAG,
            Table::Glyf(_) => glyf::TAG,
            Table::Cmap(_) => cmap::TAG,
            Table::Name(_) => name::TAG,
            Table::Os2(_) => os2::TAG,
            Table::Post(_) => post::TAG,
            Table::Gsub(_) => gsub::TAG,
            Table::Kern(_) => kern::TAG,
            Table::Vorg(_) => vorg::TAG,
            Table::Unknown(tag, _) => *tag,
        }
    }

    /// `true` for tables kept as raw bytes.
    pub fn is_unknown(&self) -> bool {
        matches!(self, Table::Unknown(..))
    }
}
