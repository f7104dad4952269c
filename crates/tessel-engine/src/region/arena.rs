use super::Region;

/// Generational handle to a region owned by the canvas.
///
/// A handle outlives its region safely: lookups through a stale handle fail
/// instead of reaching a reused slot.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct RegionId {
    index: u32,
    generation: u32,
}

#[derive(Debug)]
struct Slot {
    generation: u32,
    region: Option<Region>,
}

/// Slot table backing every region of a canvas.
#[derive(Debug, Default)]
pub struct RegionArena {
    slots: Vec<Slot>,
    free: Vec<u32>,
}

impl RegionArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, region: Region) -> RegionId {
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.region = Some(region);
            return RegionId { index, generation: slot.generation };
        }

        let index = self.slots.len() as u32;
        self.slots.push(Slot { generation: 0, region: Some(region) });
        RegionId { index, generation: 0 }
    }

    pub fn remove(&mut self, id: RegionId) -> Option<Region> {
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        let region = slot.region.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        Some(region)
    }

    #[inline]
    pub fn get(&self, id: RegionId) -> Option<&Region> {
        let slot = self.slots.get(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.region.as_ref()
    }

    #[inline]
    pub fn get_mut(&mut self, id: RegionId) -> Option<&mut Region> {
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.region.as_mut()
    }

    #[inline]
    pub fn contains(&self, id: RegionId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.region.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (RegionId, &Region)> {
        self.slots.iter().enumerate().filter_map(|(i, slot)| {
            let id = RegionId { index: i as u32, generation: slot.generation };
            slot.region.as_ref().map(|r| (id, r))
        })
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (RegionId, &mut Region)> {
        self.slots.iter_mut().enumerate().filter_map(|(i, slot)| {
            let id = RegionId { index: i as u32, generation: slot.generation };
            slot.region.as_mut().map(|r| (id, r))
        })
    }
}
